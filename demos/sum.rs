use inline_args::{Resolver, all, pair};

fn main() {
    env_logger::init();

    // Positional mode: every bare token is one number to add
    let mut cli = Resolver::from_env(2, true);

    let values: Vec<f64> = cli.get_list(all().help("Numbers to add"));
    let precision = cli.get_integer(
        pair('p', "precision")
            .help("Digits after the decimal point")
            .default(2),
    );

    cli.finish().unwrap_or_else(|e| e.exit());

    let total: f64 = values.iter().sum();
    let precision = precision.max(0) as usize;
    println!("{total:.precision$}");
}
