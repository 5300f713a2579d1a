//! Preorder axioms over a relation matrix indexed by bitmasks.

crate::prelude!();

use store::RelationVars;

/// `R[i][i]` for all `i`.
pub fn reflexivity<S: Backend + ?Sized>(vars: &RelationVars, solver: &mut S) -> Res<usize> {
    for i in 0..vars.size() {
        solver.assert(&Expr::from(vars.get(i, i)))?
    }
    Ok(vars.size())
}

/// `R[i][j] and R[j][k] => R[i][k]` for all `i`, `j`, `k`.
pub fn transitivity<S: Backend + ?Sized>(vars: &RelationVars, solver: &mut S) -> Res<usize> {
    let size = vars.size();
    for i in 0..size {
        for j in 0..size {
            let ij = vars.get(i, j);
            for k in 0..size {
                solver.assert(&build_expr!(
                    (=> (and {ij} {vars.get(j, k)}) {vars.get(i, k)})
                ))?
            }
        }
    }
    Ok(size * size * size)
}

/// `R[i][j]` whenever `i` is a subset of `j`.
pub fn monotonicity<S: Backend + ?Sized>(vars: &RelationVars, solver: &mut S) -> Res<usize> {
    let mut count = 0;
    for sup in bits::powerset(vars.universe()) {
        for sub in bits::powerset(vars.universe()).filter(|sub| bits::is_subset(*sub, sup)) {
            solver.assert(&Expr::from(vars.get(sub, sup)))?;
            count += 1;
        }
    }
    Ok(count)
}

/// `not R[full][empty]`.
pub fn full_not_below_empty<S: Backend + ?Sized>(
    vars: &RelationVars,
    solver: &mut S,
) -> Res<usize> {
    let full = bits::full(vars.universe());
    solver.assert(&build_expr!((not {vars.get(full, bits::EMPTY)})))?;
    Ok(1)
}

/// `R[i][j] and not R[j][i]` for some `i != j`, as a single disjunction.
pub fn some_strict_pair<S: Backend + ?Sized>(vars: &RelationVars, solver: &mut S) -> Res<usize> {
    let size = vars.size();
    let mut disj = Vec::with_capacity(size * size);
    for i in 0..size {
        for j in (0..size).filter(|j| *j != i) {
            disj.push(build_expr!((and {vars.get(i, j)} (not {vars.get(j, i)}))));
        }
    }
    solver.assert(&Expr::or(disj))?;
    Ok(1)
}
