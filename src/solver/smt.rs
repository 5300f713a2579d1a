//! SMT-LIB backend, drives a `z3` process through [`rsmt2`].

crate::prelude!();

use rsmt2::parse::{IdentParser, ModelParser};

/// SMT-LIB parser for model identifiers, types and values.
///
/// Identifiers that are not variable symbols produced by [`Var`] (solvers sometimes add auxiliary
/// symbols to their models) are parsed as `None`. Values that are not boolean/integer constants are
/// kept as strings.
#[derive(Debug, Clone, Copy)]
pub struct SmtParser;

impl<'a> IdentParser<Option<usize>, Typ, &'a str> for SmtParser {
    fn parse_ident(self, input: &'a str) -> SmtRes<Option<usize>> {
        Ok(Var::idx_of_symbol(input))
    }
    fn parse_type(self, input: &'a str) -> SmtRes<Typ> {
        match input.trim() {
            "Bool" => Ok(Typ::Bool),
            "Int" => Ok(Typ::Int),
            _ => bail!("unexpected type string `{}`", input),
        }
    }
}
impl<'a, Br: std::io::BufRead>
    ModelParser<Option<usize>, Typ, Either<Cst, String>, &'a mut RSmtParser<Br>> for SmtParser
{
    fn parse_value(
        self,
        input: &'a mut RSmtParser<Br>,
        _: &Option<usize>,
        _: &[(Option<usize>, Typ)],
        _: &Typ,
    ) -> SmtRes<Either<Cst, String>> {
        let sexpr = input.get_sexpr()?;
        if let Ok(cst) = parse::cst(sexpr) {
            Ok(Either::Left(cst))
        } else {
            Ok(Either::Right(sexpr.into()))
        }
    }
}

/// A model as produced by rsmt2 with our parser.
pub(super) type SmtModel = Vec<(
    Option<usize>,
    Vec<(Option<usize>, Typ)>,
    Typ,
    Either<Cst, String>,
)>;

/// Z3 backend.
pub struct Z3 {
    /// Underlying SMT solver.
    solver: SmtSolver<SmtParser>,
    /// Variables declared so far, the index of a variable is its position.
    vars: Vec<Var>,
    /// True if the last check was `sat` and nothing was declared/asserted since.
    has_model: bool,
}
impl Z3 {
    /// Constructor.
    ///
    /// `z3_cmd` is a z3 command line: its first word is the z3 binary and the following words are
    /// passed as options. If `tee` is given, the whole SMT-LIB session is written to that file.
    pub fn new(z3_cmd: impl Into<String>, tee: Option<impl AsRef<Path>>) -> Res<Self> {
        let z3_cmd = z3_cmd.into();
        let mut split_cmd = z3_cmd.split(|c: char| c.is_whitespace());
        let z3_bin = split_cmd
            .next()
            .map(str::trim)
            .filter(|bin| !bin.is_empty())
            .ok_or_else(|| Error::config(format!("illegal Z3 command `{}`", z3_cmd)))?;
        let mut conf = SmtConf::z3(z3_bin);

        for opt in split_cmd {
            let opt = opt.trim();
            if !opt.is_empty() {
                conf.option(opt);
            }
        }
        conf.check_success();

        let mut solver = conf
            .spawn(SmtParser)
            .chain_err(|| format!("while spawning z3 solver `{}`", z3_cmd))?;
        if let Some(path) = tee {
            solver
                .path_tee(path.as_ref())
                .chain_err(|| format!("while setting up tee file `{}`", path.as_ref().display()))?
        }
        info!(cmd = %z3_cmd, "spawned z3");
        Ok(Self {
            solver,
            vars: vec![],
            has_model: false,
        })
    }

    /// Spawns `z3` with its default options and no tee file.
    pub fn default_z3() -> Res<Self> {
        Self::new("z3", None::<PathBuf>)
    }

    /// Kills the underlying solver process.
    pub fn kill(mut self) -> Res<()> {
        self.solver
            .kill()
            .chain_err(|| "while killing the z3 solver")?;
        Ok(())
    }
}

impl Backend for Z3 {
    fn declare(&mut self, typ: Typ) -> Res<Var> {
        let var = Var::new(self.vars.len(), typ);
        self.solver
            .declare_const(&var, &typ)
            .chain_err(|| format!("while declaring variable `{}`", var))?;
        self.vars.push(var);
        self.has_model = false;
        Ok(var)
    }

    fn assert(&mut self, expr: &Expr) -> Res<()> {
        self.solver
            .assert(expr)
            .chain_err(|| format!("while asserting `{}`", expr))?;
        self.has_model = false;
        Ok(())
    }

    fn comment(&mut self, txt: &str) -> Res<()> {
        self.solver.comment(txt)?;
        Ok(())
    }

    fn check_sat(&mut self) -> Res<Outcome> {
        let res = match self.solver.check_sat() {
            Ok(true) => Outcome::Sat,
            Ok(false) => Outcome::Unsat,
            Err(e) => {
                use rsmt2::errors::ErrorKind as EK;
                match e.kind() {
                    EK::Unknown | EK::Timeout => Outcome::Unknown,
                    _ => return Err(e).chain_err(|| "during check-sat"),
                }
            }
        };
        self.has_model = res.is_sat();
        Ok(res)
    }

    fn valuation(&mut self) -> Res<Valuation> {
        if !self.has_model {
            bail!(Error::usage(
                "asked for a model but the last check was not `sat`"
            ))
        }
        let model: SmtModel = self
            .solver
            .get_model()
            .chain_err(|| "while retrieving model")?;

        valuation_of(&self.vars, model)
    }
}

/// Turns a parsed model into a valuation of `vars`.
///
/// Entries for unknown symbols, function symbols and non-constant values are ignored.
pub(super) fn valuation_of(vars: &[Var], model: SmtModel) -> Res<Valuation> {
    let mut valuation = Valuation::new();
    for (ident, args, _typ, value) in model {
        match (ident.and_then(|idx| vars.get(idx)), value) {
            (Some(var), Either::Left(cst)) if args.is_empty() => valuation
                .insert(*var, cst)
                .chain_err(|| "while reading z3's model")?,
            (var, value) => {
                debug!(
                    var = ?var,
                    value = %value.map_left(|cst| cst.to_string()).into_inner(),
                    "ignoring unexpected model entry",
                )
            }
        }
    }
    Ok(valuation)
}
