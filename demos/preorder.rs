//! Searches for a preorder over the powerset of a universe.
//!
//! ```text
//! cargo run --example preorder -- [<universe size>] [<axiom>...] [--z3 [<tee file>]]
//! ```
//!
//! Reflexivity and transitivity are always on, extra axioms are given by name: `monotonicity`,
//! `full-not-below-empty`, `some-strict-pair`. Uses the built-in backend unless `--z3` is given.

use finmodel::{
    conf::SolverConf,
    find::{Answer, PreorderFinder},
    prelude::*,
};
use tracing_subscriber::EnvFilter;

struct Opts {
    universe: usize,
    extra: Vec<Axiom>,
    solver: SolverConf,
}
impl Opts {
    fn new(mut args: impl Iterator<Item = String>) -> Res<Self> {
        let mut opts = Self {
            universe: 3,
            extra: vec![],
            solver: SolverConf::search(),
        };
        while let Some(arg) = args.next() {
            if arg == "--z3" {
                opts.solver = SolverConf::Z3 {
                    cmd: "z3".into(),
                    tee: args.next().map(PathBuf::from),
                };
            } else if let Some(axiom) = Axiom::of_str(&arg) {
                opts.extra.push(axiom)
            } else {
                opts.universe = arg
                    .parse()
                    .map_err(|e| format!("expected axiom or universe size, got `{}`: {}", arg, e))?
            }
        }
        Ok(opts)
    }
}

fn run(opts: Opts) -> Res<()> {
    let conf = opts
        .extra
        .iter()
        .fold(Conf::preorder(opts.universe), |conf, axiom| conf.with(*axiom));
    println!("searching for a {}", conf);

    let mut finder = PreorderFinder::new(conf, opts.solver.spawn()?)?;
    match finder.run()? {
        Answer::Found { structure, report } => {
            println!("found:");
            println!("{}", structure);
            println!();
            println!("verification:");
            println!("{}", report);
            if !report.is_ok() {
                bail!("structure found fails verification")
            }
        }
        Answer::Unsat => println!("no such preorder"),
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
fn test_preorder() {
    let args = ["3", "monotonicity", "full-not-below-empty"];
    let opts = Opts::new(args.iter().map(|s| s.to_string())).unwrap();
    run(opts).unwrap();

    let opts = Opts::new(vec!["2".into(), "some-strict-pair".into()].into_iter()).unwrap();
    run(opts).unwrap();
}
