//! Cycle detection over the transition graph.
//!
//! Cycles are legitimate in conversational workflows (revise/retry loops),
//! so they surface as warnings rather than errors.

use super::issues::ValidationWarning;
use crate::core::Spec;
use std::collections::HashMap;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    InProgress,
    Done,
}

/// Report every back-edge found by a depth-first walk of the graph.
///
/// Roots are taken in sorted state order and edges in sorted event order, so
/// the same spec always yields the same warnings. Each back-edge is reported
/// once, when first discovered; a cycle reachable from several roots is not
/// deduplicated beyond that. Edges into states missing from the table are
/// treated as already explored.
pub(crate) fn detect_cycles(spec: &Spec) -> Vec<ValidationWarning> {
    let mut marks: HashMap<&str, Mark> = HashMap::with_capacity(spec.states.len());
    let mut warnings = Vec::new();

    for id in spec.state_ids() {
        if !marks.contains_key(id) {
            visit(spec, id, &mut marks, &mut warnings);
        }
    }

    warnings
}

/// One state on the explicit DFS stack: its id, its targets in sorted event
/// order, and the index of the next target to follow.
struct Frame<'a> {
    id: &'a str,
    targets: Vec<&'a str>,
    next: usize,
}

impl<'a> Frame<'a> {
    fn enter(spec: &'a Spec, id: &'a str) -> Self {
        let targets = spec
            .states
            .get(id)
            .map(|state| {
                state
                    .events()
                    .into_iter()
                    .filter_map(|event| state.on_event.get(event).map(String::as_str))
                    .collect()
            })
            .unwrap_or_default();

        Self {
            id,
            targets,
            next: 0,
        }
    }
}

fn visit<'a>(
    spec: &'a Spec,
    root: &'a str,
    marks: &mut HashMap<&'a str, Mark>,
    warnings: &mut Vec<ValidationWarning>,
) {
    marks.insert(root, Mark::InProgress);
    let mut stack = vec![Frame::enter(spec, root)];

    while let Some(frame) = stack.last_mut() {
        let Some(&target) = frame.targets.get(frame.next) else {
            marks.insert(frame.id, Mark::Done);
            stack.pop();
            continue;
        };
        frame.next += 1;
        let from = frame.id;

        match marks.get(target) {
            Some(Mark::InProgress) => warnings.push(ValidationWarning::Cycle {
                from: from.to_string(),
                to: target.to_string(),
            }),
            Some(Mark::Done) => {}
            None if !spec.states.contains_key(target) => {
                marks.insert(target, Mark::Done);
            }
            None => {
                marks.insert(target, Mark::InProgress);
                stack.push(Frame::enter(spec, target));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::State;

    fn edges(spec: &Spec) -> Vec<(String, String)> {
        detect_cycles(spec)
            .into_iter()
            .map(|w| match w {
                ValidationWarning::Cycle { from, to } => (from, to),
                other => panic!("unexpected warning {other:?}"),
            })
            .collect()
    }

    #[test]
    fn acyclic_graph_has_no_warnings() {
        let spec = Spec::new("a")
            .with_state("a", State::new("p").with_event("Next", "b"))
            .with_state("b", State::new("p").with_event("Next", "c"))
            .with_state("c", State::new("p"));

        assert!(detect_cycles(&spec).is_empty());
    }

    #[test]
    fn two_state_loop_reports_back_edge() {
        let spec = Spec::new("a")
            .with_state("a", State::new("p").with_event("Next", "b"))
            .with_state("b", State::new("p").with_event("Back", "a"));

        assert_eq!(edges(&spec), vec![("b".to_string(), "a".to_string())]);
    }

    #[test]
    fn self_loop_is_a_cycle() {
        let spec = Spec::new("a").with_state("a", State::new("p").with_event("Retry", "a"));

        assert_eq!(edges(&spec), vec![("a".to_string(), "a".to_string())]);
    }

    #[test]
    fn diamond_is_not_a_cycle() {
        let spec = Spec::new("a")
            .with_state(
                "a",
                State::new("p").with_event("Left", "b").with_event("Right", "c"),
            )
            .with_state("b", State::new("p").with_event("Join", "d"))
            .with_state("c", State::new("p").with_event("Join", "d"))
            .with_state("d", State::new("p"));

        assert!(detect_cycles(&spec).is_empty());
    }

    #[test]
    fn one_warning_per_back_edge() {
        let spec = Spec::new("a")
            .with_state("a", State::new("p").with_event("Next", "b"))
            .with_state(
                "b",
                State::new("p")
                    .with_event("Back", "a")
                    .with_event("Stay", "b"),
            );

        assert_eq!(
            edges(&spec),
            vec![
                ("b".to_string(), "a".to_string()),
                ("b".to_string(), "b".to_string()),
            ]
        );
    }

    #[test]
    fn long_chain_is_walked_without_recursion() {
        const LEN: usize = 100_000;
        let spec = (0..LEN).fold(Spec::new("s0"), |spec, i| {
            let state = if i + 1 < LEN {
                State::new("p").with_event("Next", format!("s{}", i + 1))
            } else {
                State::new("p").with_event("Restart", "s0")
            };
            spec.with_state(format!("s{i}"), state)
        });

        assert_eq!(
            edges(&spec),
            vec![(format!("s{}", LEN - 1), "s0".to_string())]
        );

        let result = crate::validation::validate(&spec, &["p"]);
        assert!(result.is_valid());
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn missing_target_does_not_crash_or_descend() {
        let spec = Spec::new("a")
            .with_state("a", State::new("p").with_event("Next", "ghost"))
            .with_state("b", State::new("p").with_event("Next", "ghost"));

        assert!(detect_cycles(&spec).is_empty());
    }
}
