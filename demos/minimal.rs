use inline_args::{Resolver, arg, pair};

fn main() {
    env_logger::init();

    // Three declared parameters, no free positional arguments
    let mut cli = Resolver::from_env(3, false);

    let name = cli.get_string(pair('n', "name").help("Name to greet").default("world"));
    let count = cli.get_integer(pair('c', "count").help("Number of greetings").default(1));
    let shout = cli.get_flag(arg("shout").help("Print in uppercase"));

    cli.finish().unwrap_or_else(|e| e.exit());

    for _ in 0..count {
        let greeting = format!("Hello, {name}!");
        if shout {
            println!("{}", greeting.to_uppercase());
        } else {
            println!("{greeting}");
        }
    }
}
