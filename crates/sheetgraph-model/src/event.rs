//! Event nodes: the ordered tree every scene and sheet carries.
//!
//! Only two kinds matter to dependency analysis:
//! - `Link` splices another scene's or sheet's events in place
//! - `CodeGen` declares generated source-file dependencies
//!
//! Every other kind is carried as `Other`, which keeps only its tag and,
//! when the kind can own children, its sub-events.

use serde::{Deserialize, Serialize};

pub const LINK_EVENT_KIND: &str = "link";
pub const CODE_EVENT_KIND: &str = "code";

/// A node of an event tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawEventNode", into = "RawEventNode")]
pub enum EventNode {
    Link(LinkEvent),
    CodeGen(CodeGenEvent),
    Other(OtherEvent),
}

/// Includes the events of the scene or external sheet named `target`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkEvent {
    pub target: String,
}

/// A block of generated native code.
///
/// `id` names the event's own generated artifact; `dependencies` are the
/// extra source files it declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeGenEvent {
    pub id: String,
    pub dependencies: Vec<String>,
}

/// Any event kind not interpreted by the analyzer.
///
/// `sub_events` is `None` when the kind cannot own children at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtherEvent {
    pub kind: String,
    pub sub_events: Option<Vec<EventNode>>,
}

impl EventNode {
    pub fn link(target: impl Into<String>) -> Self {
        EventNode::Link(LinkEvent {
            target: target.into(),
        })
    }

    pub fn code<I, S>(id: impl Into<String>, dependencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        EventNode::CodeGen(CodeGenEvent {
            id: id.into(),
            dependencies: dependencies.into_iter().map(Into::into).collect(),
        })
    }

    /// A node that can own children.
    pub fn group(kind: impl Into<String>, sub_events: Vec<EventNode>) -> Self {
        EventNode::Other(OtherEvent {
            kind: kind.into(),
            sub_events: Some(sub_events),
        })
    }

    /// A node that cannot own children (a comment, for instance).
    pub fn leaf(kind: impl Into<String>) -> Self {
        EventNode::Other(OtherEvent {
            kind: kind.into(),
            sub_events: None,
        })
    }

    /// The `type` tag used in project files.
    pub fn kind(&self) -> &str {
        match self {
            EventNode::Link(_) => LINK_EVENT_KIND,
            EventNode::CodeGen(_) => CODE_EVENT_KIND,
            EventNode::Other(other) => &other.kind,
        }
    }

    /// Children of this node, if its kind can have sub-events.
    pub fn sub_events(&self) -> Option<&[EventNode]> {
        match self {
            EventNode::Other(other) => other.sub_events.as_deref(),
            EventNode::Link(_) | EventNode::CodeGen(_) => None,
        }
    }

    pub fn can_have_sub_events(&self) -> bool {
        self.sub_events().is_some()
    }
}

/// Errors raised when a stored event does not describe a valid node.
#[derive(Debug, thiserror::Error)]
pub enum EventNodeError {
    #[error("link event is missing its `target`")]
    MissingLinkTarget,

    #[error("code event is missing its `id`")]
    MissingCodeId,

    #[error("{0} event cannot own sub-events")]
    UnexpectedSubEvents(&'static str),
}

/// Wire shape of an event: one flat object tagged by `type`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawEventNode {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    dependencies: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    events: Option<Vec<EventNode>>,
}

impl TryFrom<RawEventNode> for EventNode {
    type Error = EventNodeError;

    fn try_from(raw: RawEventNode) -> Result<Self, Self::Error> {
        match raw.kind.as_str() {
            LINK_EVENT_KIND => {
                if raw.events.is_some() {
                    return Err(EventNodeError::UnexpectedSubEvents(LINK_EVENT_KIND));
                }
                let target = raw.target.ok_or(EventNodeError::MissingLinkTarget)?;
                Ok(EventNode::Link(LinkEvent { target }))
            }
            CODE_EVENT_KIND => {
                if raw.events.is_some() {
                    return Err(EventNodeError::UnexpectedSubEvents(CODE_EVENT_KIND));
                }
                let id = raw.id.ok_or(EventNodeError::MissingCodeId)?;
                Ok(EventNode::CodeGen(CodeGenEvent {
                    id,
                    dependencies: raw.dependencies,
                }))
            }
            _ => Ok(EventNode::Other(OtherEvent {
                kind: raw.kind,
                sub_events: raw.events,
            })),
        }
    }
}

impl From<EventNode> for RawEventNode {
    fn from(node: EventNode) -> Self {
        match node {
            EventNode::Link(link) => RawEventNode {
                kind: LINK_EVENT_KIND.to_string(),
                target: Some(link.target),
                id: None,
                dependencies: Vec::new(),
                events: None,
            },
            EventNode::CodeGen(code) => RawEventNode {
                kind: CODE_EVENT_KIND.to_string(),
                target: None,
                id: Some(code.id),
                dependencies: code.dependencies,
                events: None,
            },
            EventNode::Other(other) => RawEventNode {
                kind: other.kind,
                target: None,
                id: None,
                dependencies: Vec::new(),
                events: other.sub_events,
            },
        }
    }
}
