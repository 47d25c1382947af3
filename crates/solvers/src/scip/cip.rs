//! Writer for SCIP's CIP problem format.

use std::io::{self, Write};

use circlepack_core::model::{Constraint, Expr, Model};

/// Name of the auxiliary variable that carries a quadratic objective.
///
/// CIP objectives are linear, so `min f(x)` is written as `min t` subject to
/// `f(x) - t <= 0`.
pub(crate) const EPIGRAPH_VAR: &str = "objective_epigraph";

const EPIGRAPH_CONS: &str = "objective_epigraph_link";

/// Writes `model` in CIP format.
///
/// Variables and constraints keep the model's names, so a solution file read
/// back from SCIP maps directly onto the model's variables.
///
/// # Errors
///
/// Returns any error raised by the underlying writer.
pub fn write_cip<W: Write>(model: &Model, out: &mut W) -> io::Result<()> {
    let objective = model.objective().expr();
    let epigraph = !objective.is_linear();
    let var_count = model.variables().len() + usize::from(epigraph);
    let cons_count = model.constraints().len() + usize::from(epigraph);

    writeln!(out, "STATISTICS")?;
    writeln!(out, "  Problem name     : {}", model.name())?;
    writeln!(
        out,
        "  Variables        : {var_count} (0 binary, 0 integer, 0 implicit integer, {var_count} continuous)"
    )?;
    writeln!(out, "  Constraints      : {cons_count} initial, {cons_count} maximal")?;

    writeln!(out, "OBJECTIVE")?;
    writeln!(out, "  Sense            : minimize")?;

    writeln!(out, "VARIABLES")?;
    let mut costs = vec![0.0; model.variables().len()];
    if !epigraph {
        for &(var, coef) in objective.linear_terms() {
            costs[var.index()] += coef;
        }
    }
    for (var, cost) in model.variables().iter().zip(costs) {
        writeln!(
            out,
            "  [continuous] <{}>: obj={}, original bounds=[{},{}]",
            var.name(),
            number(cost),
            number(var.lower()),
            number(var.upper()),
        )?;
    }
    if epigraph {
        writeln!(
            out,
            "  [continuous] <{EPIGRAPH_VAR}>: obj=1, original bounds=[-inf,+inf]"
        )?;
    }

    writeln!(out, "CONSTRAINTS")?;
    for constraint in model.constraints() {
        write_constraint(model, constraint, out)?;
    }
    if epigraph {
        write!(out, "  [nonlinear] <{EPIGRAPH_CONS}>: ")?;
        write_expr(model, objective, out)?;
        writeln!(out, " -1*<{EPIGRAPH_VAR}> <= 0;")?;
    }

    writeln!(out, "END")
}

fn write_constraint<W: Write>(model: &Model, constraint: &Constraint, out: &mut W) -> io::Result<()> {
    let expr = constraint.expr();
    let kind = if expr.is_linear() { "linear" } else { "nonlinear" };
    write!(out, "  [{kind}] <{}>: ", constraint.name())?;

    let (lhs, rhs) = (constraint.lhs(), constraint.rhs());
    if lhs.is_finite() && rhs.is_finite() && lhs != rhs {
        write!(out, "{} <= ", number(lhs))?;
    }

    if expr.is_linear() {
        write_linear(model, expr, out)?;
    } else {
        write_expr(model, expr, out)?;
    }

    match (lhs.is_finite(), rhs.is_finite()) {
        (true, true) if lhs == rhs => writeln!(out, " == {};", number(rhs)),
        (_, true) => writeln!(out, " <= {};", number(rhs)),
        (true, false) => writeln!(out, " >= {};", number(lhs)),
        (false, false) => writeln!(out, " >= -inf;"),
    }
}

/// Linear terms in the `+c<name>[C]` form used by linear constraints.
fn write_linear<W: Write>(model: &Model, expr: &Expr, out: &mut W) -> io::Result<()> {
    let mut sep = "";
    for &(var, coef) in expr.linear_terms() {
        write!(out, "{sep}{:+}<{}>[C]", coef, model.variable(var).name())?;
        sep = " ";
    }
    Ok(())
}

/// Linear and product terms in SCIP's expression syntax.
fn write_expr<W: Write>(model: &Model, expr: &Expr, out: &mut W) -> io::Result<()> {
    let mut sep = "";
    for &(a, b, coef) in expr.quadratic_terms() {
        let a = model.variable(a).name();
        let b = model.variable(b).name();
        if a == b {
            write!(out, "{sep}{coef:+}*<{a}>^2")?;
        } else {
            write!(out, "{sep}{coef:+}*<{a}>*<{b}>")?;
        }
        sep = " ";
    }
    for &(var, coef) in expr.linear_terms() {
        write!(out, "{sep}{coef:+}*<{}>", model.variable(var).name())?;
        sep = " ";
    }
    Ok(())
}

/// Formats a value the way SCIP prints it, with `±inf` for infinities.
pub(crate) fn number(value: f64) -> String {
    if value == f64::INFINITY {
        "+inf".to_owned()
    } else if value == f64::NEG_INFINITY {
        "-inf".to_owned()
    } else {
        value.to_string()
    }
}
