use std::process;

use check_vsphere::commands;

fn main() {
    let matches = commands::check::command().get_matches();

    check_vsphere::init_logging(matches.get_count("verbose"));

    let outcome = commands::check(&matches);
    println!("{}", outcome.text);
    process::exit(outcome.exit_code());
}
