//! Dependency ordering of declarations.
//!
//! Kahn's algorithm with a min-heap keyed by input position, so declarations
//! with no ordering constraint keep their input order. Reference cycles are
//! not an error: when nothing is ready, the earliest remaining declaration
//! that lies on a cycle is emitted and the sort carries on.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use tracing::{debug, warn};

use crate::ir::Declaration;

/// Sort so that every declaration comes at or after the declarations it names,
/// except where a cycle makes that impossible.
pub fn sort(declarations: Vec<Declaration>) -> Vec<Declaration> {
    let order = sorted_indices(&declarations);
    let mut slots: Vec<Option<Declaration>> = declarations.into_iter().map(Some).collect();
    order.into_iter().filter_map(|idx| slots[idx].take()).collect()
}

fn sorted_indices(declarations: &[Declaration]) -> Vec<usize> {
    let n = declarations.len();
    let index_of: HashMap<&str, usize> = declarations
        .iter()
        .enumerate()
        .map(|(idx, d)| (d.name.as_str(), idx))
        .collect();

    // dependents[i] = declarations that name i (i must come before them)
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut depends_on: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut in_degree: Vec<usize> = vec![0; n];
    for (idx, decl) in declarations.iter().enumerate() {
        for name in decl.ty.references() {
            match index_of.get(name) {
                Some(&dep) if dep != idx => {
                    dependents[dep].push(idx);
                    depends_on[idx].push(dep);
                    in_degree[idx] += 1;
                }
                // self references and unknown names impose no order
                _ => {}
            }
        }
    }

    let mut ready: BinaryHeap<Reverse<usize>> = in_degree
        .iter()
        .enumerate()
        .filter(|&(_, &degree)| degree == 0)
        .map(|(idx, _)| Reverse(idx))
        .collect();
    let mut done = vec![false; n];
    let mut out = Vec::with_capacity(n);

    while out.len() < n {
        let idx = match ready.pop() {
            Some(Reverse(idx)) => idx,
            None => {
                // every remaining declaration waits on another: break the earliest cycle
                let cyclic = cycle_members(&depends_on, &done);
                let Some(idx) = (0..n)
                    .find(|&i| !done[i] && cyclic[i])
                    .or_else(|| (0..n).find(|&i| !done[i]))
                else {
                    break;
                };
                warn!(declaration = %declarations[idx].name, "breaking reference cycle");
                idx
            }
        };
        if done[idx] {
            continue;
        }
        done[idx] = true;
        out.push(idx);
        for &next in &dependents[idx] {
            in_degree[next] = in_degree[next].saturating_sub(1);
            if in_degree[next] == 0 && !done[next] {
                ready.push(Reverse(next));
            }
        }
    }

    debug!(declarations = n, "sorted declarations");
    out
}

const UNVISITED: usize = usize::MAX;

/// Marks the declarations lying on a cycle through declarations not yet emitted:
/// members of a strongly connected component with more than one member
/// (self references never enter `depends_on`). Iterative Tarjan, linear in
/// declarations plus references.
fn cycle_members(depends_on: &[Vec<usize>], done: &[bool]) -> Vec<bool> {
    let n = depends_on.len();
    let mut index = vec![UNVISITED; n];
    let mut low = vec![0; n];
    let mut on_stack = vec![false; n];
    let mut stack: Vec<usize> = Vec::new();
    let mut cyclic = vec![false; n];
    let mut next_index = 0;

    for root in 0..n {
        if done[root] || index[root] != UNVISITED {
            continue;
        }
        // (declaration, position of the next edge to follow)
        let mut frames: Vec<(usize, usize)> = vec![(root, 0)];
        index[root] = next_index;
        low[root] = next_index;
        next_index += 1;
        stack.push(root);
        on_stack[root] = true;

        while let Some(frame) = frames.last_mut() {
            let node = frame.0;
            if let Some(&dep) = depends_on[node].get(frame.1) {
                frame.1 += 1;
                if done[dep] {
                    continue;
                }
                if index[dep] == UNVISITED {
                    index[dep] = next_index;
                    low[dep] = next_index;
                    next_index += 1;
                    stack.push(dep);
                    on_stack[dep] = true;
                    frames.push((dep, 0));
                } else if on_stack[dep] {
                    low[node] = low[node].min(index[dep]);
                }
                continue;
            }

            frames.pop();
            if let Some(&(parent, _)) = frames.last() {
                low[parent] = low[parent].min(low[node]);
            }
            if low[node] == index[node] {
                let mut component = Vec::new();
                while let Some(member) = stack.pop() {
                    on_stack[member] = false;
                    component.push(member);
                    if member == node {
                        break;
                    }
                }
                if component.len() > 1 {
                    for member in component {
                        cyclic[member] = true;
                    }
                }
            }
        }
    }
    cyclic
}
