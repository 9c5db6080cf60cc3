//! Test utilities for perc development.
//!
//! Deterministic graph builders for the standard fixtures and checkers
//! for the simulator's global invariants. The checkers return
//! `Result<(), String>` so property tests can surface the violation in
//! the failure message.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::collections::HashSet;

use perc_core::{NodeId, ParticleId, Timestep};
use perc_graph::{AdjacencyGraph, GraphError};
use perc_sim::World;
use rand::Rng;

// ── Graph builders ──────────────────────────────────────────────

/// A path `0 - 1 - ... - n-1`.
pub fn path_graph(n: u32) -> Result<AdjacencyGraph, GraphError> {
    let edges: Vec<(u32, u32)> = (1..n).map(|i| (i - 1, i)).collect();
    AdjacencyGraph::new(n, &edges)
}

/// A cycle over `n` nodes.
pub fn cycle_graph(n: u32) -> Result<AdjacencyGraph, GraphError> {
    let edges: Vec<(u32, u32)> = (0..n).map(|i| (i, (i + 1) % n)).collect();
    AdjacencyGraph::new(n, &edges)
}

/// The complete graph over `n` nodes.
pub fn complete_graph(n: u32) -> Result<AdjacencyGraph, GraphError> {
    let mut edges = Vec::new();
    for a in 0..n {
        for b in (a + 1)..n {
            edges.push((a, b));
        }
    }
    AdjacencyGraph::new(n, &edges)
}

/// A star with node 0 at the centre.
pub fn star_graph(n: u32) -> Result<AdjacencyGraph, GraphError> {
    let edges: Vec<(u32, u32)> = (1..n).map(|i| (0, i)).collect();
    AdjacencyGraph::new(n, &edges)
}

/// An Erdős–Rényi G(n, p) graph, connected-ish for testing but with no
/// connectivity guarantee.
pub fn gnp_graph<R: Rng + ?Sized>(
    n: u32,
    p: f64,
    rng: &mut R,
) -> Result<AdjacencyGraph, GraphError> {
    let mut edges = Vec::new();
    for a in 0..n {
        for b in (a + 1)..n {
            if rng.random::<f64>() < p {
                edges.push((a, b));
            }
        }
    }
    AdjacencyGraph::new(n, &edges)
}

// ── Invariant checkers ──────────────────────────────────────────

/// Capacity invariant: no node's queue exceeds its capacity.
pub fn check_capacity<P>(world: &World<P>) -> Result<(), String> {
    for (node, state) in world.iter() {
        if state.queue_len() > state.capacity() {
            return Err(format!(
                "node {node}: queue length {} exceeds capacity {}",
                state.queue_len(),
                state.capacity()
            ));
        }
    }
    Ok(())
}

/// Single-ownership invariant: every particle id appears exactly once
/// across all queue, overflow, and retired collections.
pub fn check_single_ownership<P>(world: &World<P>) -> Result<(), String> {
    let mut seen: HashSet<ParticleId> = HashSet::new();
    for particle in world.particles() {
        if !seen.insert(particle.id()) {
            return Err(format!("particle {} owned twice", particle.id()));
        }
    }
    Ok(())
}

/// At-most-once-per-tick invariant: no particle's path records two hops
/// in the same timestep.
pub fn check_no_double_moves<P>(world: &World<P>) -> Result<(), String> {
    for particle in world.particles() {
        let mut hops: HashSet<Timestep> = HashSet::new();
        for hop in particle.path() {
            if !hops.insert(hop.timestep) {
                return Err(format!(
                    "particle {} moved twice in timestep {}",
                    particle.id(),
                    hop.timestep
                ));
            }
        }
    }
    Ok(())
}

/// Run all three global invariant checks.
pub fn check_invariants<P>(world: &World<P>) -> Result<(), String> {
    check_capacity(world)?;
    check_single_ownership(world)?;
    check_no_double_moves(world)
}

// ── Fixtures ────────────────────────────────────────────────────

/// The six-node obstacle fixture used by the detour tests:
/// edges 0-4, 0-1, 0-2, 0-3, 3-2, 2-1, 1-5.
pub fn obstacle_fixture() -> AdjacencyGraph {
    AdjacencyGraph::new(6, &[(0, 4), (0, 1), (0, 2), (0, 3), (3, 2), (2, 1), (1, 5)])
        .expect("fixture edges are valid")
}

/// Seed one particle by hand at `start` targeting `target`.
pub fn place_particle<P>(world: &mut World<P>, start: u32, target: u32) -> ParticleId {
    let particle = world.mint(NodeId(start), Timestep::ZERO, NodeId(target));
    let id = particle.id();
    world
        .state_mut(NodeId(start))
        .expect("start node exists")
        .admit(particle);
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use perc_graph::Topology;

    #[test]
    fn builders_produce_expected_degrees() {
        let path = path_graph(5).unwrap();
        assert_eq!(path.degree(NodeId(0)), 1);
        assert_eq!(path.degree(NodeId(2)), 2);

        let cycle = cycle_graph(5).unwrap();
        assert!((0..5).all(|i| cycle.degree(NodeId(i)) == 2));

        let complete = complete_graph(5).unwrap();
        assert!((0..5).all(|i| complete.degree(NodeId(i)) == 4));

        let star = star_graph(5).unwrap();
        assert_eq!(star.degree(NodeId(0)), 4);
        assert_eq!(star.degree(NodeId(1)), 1);
    }

    #[test]
    fn checkers_pass_on_a_fresh_world() {
        let world: World<()> = World::new(Box::new(path_graph(4).unwrap()), 2);
        check_invariants(&world).unwrap();
    }

    #[test]
    fn ownership_checker_spots_duplicates() {
        let mut world: World<()> = World::new(Box::new(path_graph(2).unwrap()), 2);
        let particle = world.mint(NodeId(0), Timestep::ZERO, NodeId(1));
        let copy = particle.clone();
        world.state_mut(NodeId(0)).unwrap().admit(particle);
        world.state_mut(NodeId(1)).unwrap().admit(copy);
        assert!(check_single_ownership(&world).is_err());
    }

    #[test]
    fn obstacle_fixture_distances() {
        let graph = obstacle_fixture();
        assert_eq!(graph.hop_distance(NodeId(1), NodeId(5)), Some(1));
        assert_eq!(graph.hop_distance(NodeId(2), NodeId(5)), Some(2));
        assert_eq!(graph.hop_distance(NodeId(4), NodeId(5)), Some(3));
    }
}
