//! Depth-first walk of an event tree.
//!
//! The walk carries ancestor chains down and results up: each call returns
//! a `TraversalDelta` that its caller unions into its own accumulator.
//! Chains are pushed before following a link and popped after, so the same
//! scene or sheet may be reached along two disjoint paths; only re-entering
//! a name on the current path is a cycle.

use crate::chain::AncestorChain;
use crate::error::{AnalysisError, LinkKind};
use crate::sets::DependencySets;
use sheetgraph_model::{EventNode, Project};
use std::collections::BTreeSet;

/// Scene and sheet names on the active recursion path.
#[derive(Debug, Clone, Default)]
pub struct TraversalContext {
    scenes: AncestorChain,
    sheets: AncestorChain,
}

impl TraversalContext {
    pub fn from_scene(name: &str) -> Self {
        Self {
            scenes: AncestorChain::rooted(name),
            sheets: AncestorChain::new(),
        }
    }

    pub fn from_sheet(name: &str) -> Self {
        Self {
            scenes: AncestorChain::new(),
            sheets: AncestorChain::rooted(name),
        }
    }

    pub fn chain(&self, kind: LinkKind) -> &AncestorChain {
        match kind {
            LinkKind::Scene => &self.scenes,
            LinkKind::Sheet => &self.sheets,
        }
    }

    fn chain_mut(&mut self, kind: LinkKind) -> &mut AncestorChain {
        match kind {
            LinkKind::Scene => &mut self.scenes,
            LinkKind::Sheet => &mut self.sheets,
        }
    }
}

/// What one recursive call contributed.
#[derive(Debug, Clone, Default)]
pub struct TraversalDelta {
    pub dependencies: DependencySets,
    /// Link targets that matched neither a sheet nor a scene.
    pub unresolved_links: BTreeSet<String>,
}

impl TraversalDelta {
    fn merge(&mut self, other: TraversalDelta) {
        self.dependencies.merge(other.dependencies);
        self.unresolved_links.extend(other.unresolved_links);
    }
}

/// One in-flight walk over a borrowed project.
pub struct Traversal<'p> {
    project: &'p Project,
    context: TraversalContext,
}

impl<'p> Traversal<'p> {
    pub fn new(project: &'p Project, context: TraversalContext) -> Self {
        Self { project, context }
    }

    pub fn context(&self) -> &TraversalContext {
        &self.context
    }

    /// Walk `events` in order, stopping at the first cycle.
    pub fn walk(
        &mut self,
        events: &'p [EventNode],
        top_level: bool,
    ) -> Result<TraversalDelta, AnalysisError> {
        let mut delta = TraversalDelta::default();

        for node in events {
            match node {
                EventNode::Link(link) => {
                    let Some(target) = self.project.resolve_link(&link.target) else {
                        tracing::warn!(
                            target_name = %link.target,
                            "link target matches no external sheet or scene; skipped"
                        );
                        delta.unresolved_links.insert(link.target.clone());
                        continue;
                    };

                    let kind = LinkKind::of(&target);
                    let name = target.name();
                    let chain = self.context.chain_mut(kind);
                    if !chain.push(name) {
                        return Err(AnalysisError::CyclicDependency {
                            kind,
                            target: name.to_string(),
                            chain: chain.as_slice().to_vec(),
                        });
                    }
                    tracing::trace!(%kind, name, top_level, depth = chain.len(), "following link");

                    delta.dependencies.record_link(kind, name, top_level);
                    let nested = self.walk(target.events(), top_level);
                    self.context.chain_mut(kind).pop();
                    let nested = nested?;

                    if !top_level {
                        delta.dependencies.merge_as_nested(&nested.dependencies);
                    }
                    delta.merge(nested);
                }
                EventNode::CodeGen(code) => {
                    for dependency in &code.dependencies {
                        delta.dependencies.record_source_file(dependency.as_str());
                    }
                    delta
                        .dependencies
                        .record_source_file(self.project.managed_source_file(code));
                }
                EventNode::Other(_) => {
                    if let Some(children) = node.sub_events() {
                        let nested = self.walk(children, false)?;
                        delta.merge(nested);
                    }
                }
            }
        }

        Ok(delta)
    }
}
