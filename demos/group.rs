//! Searches for a group of a given size.
//!
//! ```text
//! cargo run --example group -- [<size>] [--abelian] [--z3 [<tee file>]]
//! ```
//!
//! Uses the built-in backend unless `--z3` is given. Set `RUST_LOG=debug` for details.

use finmodel::{
    conf::SolverConf,
    find::{Answer, GroupFinder},
    prelude::*,
};
use tracing_subscriber::EnvFilter;

/// Command-line options.
struct Opts {
    size: usize,
    abelian: bool,
    solver: SolverConf,
}
impl Opts {
    fn new(mut args: impl Iterator<Item = String>) -> Res<Self> {
        let mut opts = Self {
            size: 4,
            abelian: false,
            solver: SolverConf::search(),
        };
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--abelian" => opts.abelian = true,
                "--z3" => {
                    opts.solver = SolverConf::Z3 {
                        cmd: "z3".into(),
                        tee: args.next().map(PathBuf::from),
                    }
                }
                size => {
                    opts.size = size
                        .parse()
                        .map_err(|e| format!("illegal size `{}`: {}", size, e))?
                }
            }
        }
        Ok(opts)
    }
}

fn run(opts: Opts) -> Res<()> {
    let mut conf = Conf::group(opts.size);
    if opts.abelian {
        conf = conf.with(Axiom::Commutativity)
    }
    println!("searching for a {}", conf);

    let mut finder = GroupFinder::new(conf, opts.solver.spawn()?)?;
    match finder.run()? {
        Answer::Found { structure, report } => {
            println!("found:");
            println!("{}", structure);
            println!();
            println!("verification:");
            println!("{}", report);
            println!("latin square: {}", verify::latin_square(&structure));
            if !report.is_ok() {
                bail!("structure found fails verification")
            }
        }
        Answer::Unsat => println!("no such group"),
        Answer::Unknown => println!("could not decide"),
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let res = Opts::new(std::env::args().skip(1)).and_then(run);
    if let Err(e) = res {
        eprintln!("|===| Error:");
        for e in e.into_iter() {
            eprintln!("| {}", e);
        }
        eprintln!("|===|");
        std::process::exit(2);
    }
}

#[test]
fn test_group() {
    for args in &[vec![], vec!["3", "--abelian"]] {
        let opts = Opts::new(args.iter().map(|s| s.to_string())).unwrap();
        run(opts).unwrap()
    }
}
