use inline_args::{Resolver, pair, pos};

fn main() {
    env_logger::init();

    // Two positional parameters addressed by index plus one named option
    let mut cli = Resolver::from_env(3, true);

    let source = cli.get_string(pos(0).help("Source path"));
    let target = cli.get_string(pos(1).help("Target path").default("out.txt"));
    let retries = cli.get_integer_opt(pair('r', "retries").help("Retry count"));

    cli.finish().unwrap_or_else(|e| e.exit());

    println!("{source} -> {target}");
    if let Some(retries) = retries {
        println!("retries: {retries}");
    }
}
