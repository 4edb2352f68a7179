// src/domain/action.rs
//! Statistics aggregation over a built graph.
//!
//! [`cascade_perform_action`] applies `f` to the `target` children of a node
//! if the node declares that kind; otherwise it descends into the *primary*
//! children and takes the plain mean of their results. Secondary children are
//! never descended into. `None` results (no data) are skipped, so one course
//! without grades does not drag an average towards zero.
//!
//! The mean is unweighted: a year averages its courses, not their students.

use super::kind::NodeKind;
use super::node::DomainNode;
use crate::error::{Error, Result};
use crate::grades::GradeSheet;

pub fn cascade_perform_action<F>(node: &DomainNode, target: NodeKind, f: &F) -> Result<Option<f64>>
where
    F: Fn(&DomainNode) -> Option<f64>,
{
    if node.kind() == target {
        return Ok(f(node));
    }

    if node.kind().declares(target) {
        let children = node.children(target);
        if target.is_singular() {
            return match children {
                [] => Ok(None),
                [only] => Ok(f(only)),
                _ => Err(Error::GraphInvariant(format!(
                    "{} has {} {target} children, expected one",
                    node.key(),
                    children.len()
                ))),
            };
        }
        return Ok(mean(children.iter().map(|c| f(c))));
    }

    let mut results = Vec::new();
    for kind in node.kind().primary() {
        for child in node.children(*kind) {
            results.push(cascade_perform_action(child, target, f)?);
        }
    }
    Ok(mean(results))
}

/// Weighted grade average, aggregated up to `node`.
pub fn grade_average(node: &DomainNode) -> Result<Option<f64>> {
    cascade_perform_action(node, NodeKind::GradeSheet, &|sheet: &DomainNode| {
        sheet.record().and_then(|r| GradeSheet::from_record(r).weighted_average())
    })
}

/// Quantities summed over every grade sheet reachable through primary children.
pub fn grade_totals(node: &DomainNode) -> GradeSheet {
    let mut total = GradeSheet::default();
    collect_sheets(node, &mut total);
    total
}

fn collect_sheets(node: &DomainNode, total: &mut GradeSheet) {
    if let Some(record) = node.record().filter(|_| node.kind() == NodeKind::GradeSheet) {
        total.merge(&GradeSheet::from_record(record));
        return;
    }
    for sheet in node.children(NodeKind::GradeSheet) {
        collect_sheets(sheet, total);
    }
    for kind in node.kind().primary() {
        for child in node.children(*kind) {
            collect_sheets(child, total);
        }
    }
}

fn mean(values: impl IntoIterator<Item = Option<f64>>) -> Option<f64> {
    let (sum, n) = values
        .into_iter()
        .flatten()
        .fold((0.0, 0u32), |(sum, n), v| (sum + v, n + 1));
    (n > 0).then(|| sum / f64::from(n))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_skips_missing() {
        assert_eq!(mean([Some(9.75), None, Some(6.0)]), Some(7.875));
        assert_eq!(mean([None, None]), None);
        assert_eq!(mean(Vec::new()), None);
    }
}
