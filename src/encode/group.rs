//! Group axioms over a multiplication table.

crate::prelude!();

use store::TableVars;

/// Every cell and the identity lie in `[0, n)`.
pub fn domain<S: Backend + ?Sized>(vars: &TableVars, solver: &mut S) -> Res<usize> {
    let (zero, size) = (0usize, vars.size());
    let mut count = 0;
    for var in vars.all() {
        solver.assert(&build_expr!((and (>= {var} {zero}) (< {var} {size}))))?;
        count += 1;
    }
    Ok(count)
}

/// `e*a = a` and `a*e = a`, one assertion per `a`.
///
/// The identity is a variable, hence the case split over its candidate values `e'`:
/// `identity = e' => table[e'][a] = a`.
pub fn identity<S: Backend + ?Sized>(vars: &TableVars, solver: &mut S) -> Res<usize> {
    let (size, id) = (vars.size(), vars.identity());
    for a in 0..size {
        let mut conj = Vec::with_capacity(2 * size);
        for e in 0..size {
            conj.push(build_expr!((=> (= {id} {e}) (= {vars.get(e, a)} {a}))));
            conj.push(build_expr!((=> (= {id} {e}) (= {vars.get(a, e)} {a}))));
        }
        solver.assert(&Expr::and(conj))?;
    }
    Ok(size)
}

/// `(a*b)*c = a*(b*c)`, case-split over the values `p = a*b` and `q = b*c`.
///
/// Makes `n^5` assertions.
pub fn associativity<S: Backend + ?Sized>(vars: &TableVars, solver: &mut S) -> Res<usize> {
    let size = vars.size();
    let mut count = 0;
    for a in 0..size {
        for b in 0..size {
            let ab = vars.get(a, b);
            for c in 0..size {
                let bc = vars.get(b, c);
                for p in 0..size {
                    for q in 0..size {
                        solver.assert(&build_expr!(
                            (=>
                                (and (= {ab} {p}) (= {bc} {q}))
                                (= {vars.get(p, c)} {vars.get(a, q)})
                            )
                        ))?;
                        count += 1;
                    }
                }
            }
        }
    }
    Ok(count)
}

/// Every `a` has a right inverse (`a*b = e` for some `b`) and a left inverse (`b*a = e` for some
/// `b`).
pub fn inverse<S: Backend + ?Sized>(vars: &TableVars, solver: &mut S) -> Res<usize> {
    let (size, id) = (vars.size(), vars.identity());
    for a in 0..size {
        let right = (0..size)
            .map(|b| build_expr!((= {vars.get(a, b)} {id})))
            .collect();
        solver.assert(&Expr::or(right))?;
        let left = (0..size)
            .map(|b| build_expr!((= {vars.get(b, a)} {id})))
            .collect();
        solver.assert(&Expr::or(left))?;
    }
    Ok(2 * size)
}

/// `a*b = b*a` for `a < b`.
pub fn commutativity<S: Backend + ?Sized>(vars: &TableVars, solver: &mut S) -> Res<usize> {
    let size = vars.size();
    let mut count = 0;
    for a in 0..size {
        for b in (a + 1)..size {
            solver.assert(&build_expr!((= {vars.get(a, b)} {vars.get(b, a)})))?;
            count += 1;
        }
    }
    Ok(count)
}
