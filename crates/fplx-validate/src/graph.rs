//! Membership hierarchy built from the relations table.
//!
//! Edges point from member to container (`X isa Y`, `Z partof W`). Terms
//! outside the local namespace are leaves: they may be members but never
//! containers of local terms, so they cannot close a cycle.
//!
//! `isa` and `partof` edges share one graph for the acyclicity check. A
//! family nested in a family that is a subunit of a complex is a legitimate
//! mixed chain, and only the combined graph has to be a DAG.

use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};

use tracing::debug;

use fplx_model::{Finding, FindingKind, NamespacePolicy, Relation, RelationTriple, TableKind, Term};

use crate::registry::EntityRegistry;

/// Local-to-local edges keyed by id; the value is the line of the first
/// triple that introduced the edge.
type Adjacency = BTreeMap<String, BTreeMap<String, usize>>;

static NO_EDGES: BTreeMap<String, usize> = BTreeMap::new();

#[derive(Debug, Clone, Default)]
pub struct RelationGraph {
    parents: BTreeMap<Term, BTreeSet<(Term, Relation)>>,
    children: BTreeMap<Term, BTreeSet<(Term, Relation)>>,
    universe: BTreeSet<Term>,
    local_mentions: BTreeSet<String>,
    cycle_count: usize,
}

impl RelationGraph {
    /// Build the graph and check referential integrity and acyclicity.
    ///
    /// Every triple is inspected; findings accumulate instead of stopping at
    /// the first problem.
    pub fn build(
        triples: &[RelationTriple],
        registry: &EntityRegistry,
        policy: &NamespacePolicy,
    ) -> (Self, Vec<Finding>) {
        let mut graph = Self::default();
        let mut findings = Vec::new();
        let mut first_seen: HashMap<(&Term, Relation, &Term), usize> = HashMap::new();
        let mut adjacency = Adjacency::new();

        for triple in triples {
            if let Some(first) = first_seen.get(&triple.key()) {
                findings.push(
                    Finding::new(
                        TableKind::Relations,
                        FindingKind::DuplicateRelation,
                        format!("duplicate relation {triple} (first on line {first})"),
                    )
                    .at_line(triple.line)
                    .related_to(*first),
                );
                continue;
            }
            first_seen.insert(triple.key(), triple.line);
            check_endpoints(triple, registry, policy, &mut findings);
            graph.insert(triple, policy);

            if policy.is_local(&triple.subject.namespace)
                && policy.is_local(&triple.object.namespace)
            {
                adjacency
                    .entry(triple.subject.id.clone())
                    .or_default()
                    .entry(triple.object.id.clone())
                    .or_insert(triple.line);
                adjacency.entry(triple.object.id.clone()).or_default();
            }
        }

        for (path, line) in find_cycles(&adjacency) {
            findings.push(
                Finding::new(
                    TableKind::Relations,
                    FindingKind::Cycle,
                    format!("cycle in isa/partof hierarchy: {}", path.join(" -> ")),
                )
                .at_line(line)
                .with_cycle(path),
            );
            graph.cycle_count += 1;
        }

        debug!(
            terms = graph.universe.len(),
            local_edges = adjacency.values().map(BTreeMap::len).sum::<usize>(),
            cycles = graph.cycle_count,
            "relation graph built"
        );
        (graph, findings)
    }

    fn insert(&mut self, triple: &RelationTriple, policy: &NamespacePolicy) {
        self.parents
            .entry(triple.subject.clone())
            .or_default()
            .insert((triple.object.clone(), triple.relation));
        self.children
            .entry(triple.object.clone())
            .or_default()
            .insert((triple.subject.clone(), triple.relation));
        for term in [&triple.subject, &triple.object] {
            self.universe.insert(term.clone());
            if policy.is_local(&term.namespace) {
                self.local_mentions.insert(term.id.clone());
            }
        }
    }

    /// Every term that appears in the relations table.
    pub fn universe(&self) -> &BTreeSet<Term> {
        &self.universe
    }

    pub fn is_member(&self, term: &Term) -> bool {
        self.universe.contains(term)
    }

    /// Whether a local id appears in any triple, under any local namespace token.
    pub fn mentions_local(&self, id: &str) -> bool {
        self.local_mentions.contains(id)
    }

    pub fn cycle_count(&self) -> usize {
        self.cycle_count
    }

    /// Terms directly above `term`, with the relation linking them.
    pub fn parents(&self, term: &Term) -> Vec<(Term, Relation)> {
        self.parents
            .get(term)
            .map(|edges| edges.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Terms directly below `term`, with the relation linking them.
    pub fn children(&self, term: &Term) -> Vec<(Term, Relation)> {
        self.children
            .get(term)
            .map(|edges| edges.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// All terms reachable upward from `term`, sorted. Safe on cyclic input.
    pub fn ancestors(&self, term: &Term) -> Vec<Term> {
        reachable(&self.parents, term)
    }

    /// All terms reachable downward from `term`, sorted. Safe on cyclic input.
    pub fn descendants(&self, term: &Term) -> Vec<Term> {
        reachable(&self.children, term)
    }

    /// Top-level families and complexes: containers that are never members.
    pub fn roots(&self) -> Vec<Term> {
        self.children
            .keys()
            .filter(|term| !self.parents.contains_key(*term))
            .cloned()
            .collect()
    }
}

fn check_endpoints(
    triple: &RelationTriple,
    registry: &EntityRegistry,
    policy: &NamespacePolicy,
    findings: &mut Vec<Finding>,
) {
    let mut reported: Option<&str> = None;
    for (role, term) in [("subject", &triple.subject), ("object", &triple.object)] {
        if !policy.is_relation_namespace(&term.namespace) {
            findings.push(
                Finding::new(
                    TableKind::Relations,
                    FindingKind::MalformedNamespace,
                    format!(
                        "invalid {role} namespace '{}' in relation {triple}",
                        term.namespace
                    ),
                )
                .at_line(triple.line),
            );
            continue;
        }
        if policy.is_local(&term.namespace)
            && !registry.contains(&term.id)
            && reported != Some(term.id.as_str())
        {
            findings.push(
                Finding::new(
                    TableKind::Relations,
                    FindingKind::UnresolvedReference,
                    format!(
                        "{role} id {} in relation {triple} is not in the entity list",
                        term.id
                    ),
                )
                .at_line(triple.line),
            );
            reported = Some(term.id.as_str());
        }
    }
}

fn reachable(edges: &BTreeMap<Term, BTreeSet<(Term, Relation)>>, start: &Term) -> Vec<Term> {
    let mut seen: BTreeSet<Term> = BTreeSet::new();
    let mut queue: VecDeque<&Term> = VecDeque::from([start]);
    while let Some(current) = queue.pop_front() {
        let Some(next) = edges.get(current) else {
            continue;
        };
        for (term, _) in next {
            if term != start && seen.insert(term.clone()) {
                queue.push_back(term);
            }
        }
    }
    seen.into_iter().collect()
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    OnPath,
    Done,
}

/// Depth-first search over `adjacency` in sorted order. Each edge back onto
/// the active path yields one cycle, reported as the path from the revisited
/// node around to itself together with the line of the closing edge.
fn find_cycles(adjacency: &Adjacency) -> Vec<(Vec<String>, usize)> {
    let mut marks: HashMap<&str, Mark> = HashMap::new();
    let mut cycles = Vec::new();

    for start in adjacency.keys() {
        if marks.contains_key(start.as_str()) {
            continue;
        }
        marks.insert(start.as_str(), Mark::OnPath);
        let mut path: Vec<&str> = vec![start.as_str()];
        let mut stack = vec![adjacency.get(start).unwrap_or(&NO_EDGES).iter()];

        loop {
            let Some(edges) = stack.last_mut() else {
                break;
            };
            match edges.next() {
                Some((next, line)) => match marks.get(next.as_str()) {
                    Some(Mark::OnPath) => {
                        if let Some(pos) = path.iter().position(|node| *node == next.as_str()) {
                            let mut cycle: Vec<String> =
                                path[pos..].iter().map(|node| (*node).to_string()).collect();
                            cycle.push(next.clone());
                            cycles.push((cycle, *line));
                        }
                    }
                    Some(Mark::Done) => {}
                    None => {
                        marks.insert(next.as_str(), Mark::OnPath);
                        path.push(next.as_str());
                        stack.push(adjacency.get(next).unwrap_or(&NO_EDGES).iter());
                    }
                },
                None => {
                    stack.pop();
                    if let Some(node) = path.pop() {
                        marks.insert(node, Mark::Done);
                    }
                }
            }
        }
    }
    cycles
}
