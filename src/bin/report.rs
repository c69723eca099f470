//! Print the elimination report for a standings file.
//! Run with: cargo run --bin report -- teams4.txt
//! Files ending in `.csv` are read as CSV. Set ELIMINATION_ALLOW_OUTSIDE_GAMES=1 for
//! divisional files whose remaining games include teams outside the table.

use division_elimination::{config, load_standings, Division};
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("warn"));

    let paths: Vec<String> = std::env::args().skip(1).collect();
    if paths.is_empty() {
        eprintln!("usage: report <standings-file>...");
        return ExitCode::from(2);
    }

    let options = config::load_options_from_env();
    let mut failed = false;
    for path in &paths {
        let division = match load_standings(path, options).and_then(Division::new) {
            Ok(d) => d,
            Err(e) => {
                log::error!("{}: {}", path, e);
                eprintln!("{}: {}", path, e);
                failed = true;
                continue;
            }
        };
        if paths.len() > 1 {
            println!("== {}", path);
        }
        for team in division.report() {
            println!("{}", team);
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
