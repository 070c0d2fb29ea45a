//! Display tree nodes for the saved-request sidebar.

use serde::{Deserialize, Serialize};

use crate::persistence::{Folder, Id, SavedRequest};

/// Theme colour token used for node icons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TintColor {
    /// `charts.blue`
    Blue,
    /// `charts.green`
    Green,
    /// `charts.orange`
    Orange,
    /// `charts.red`
    Red,
    /// `charts.yellow`
    Yellow,
    /// The default foreground colour.
    Foreground,
}

impl TintColor {
    const FOLDER_CYCLE: [Self; 5] = [Self::Blue, Self::Green, Self::Orange, Self::Red, Self::Yellow];

    /// Returns the theme token the host resolves into a colour.
    #[must_use]
    pub const fn theme_token(self) -> &'static str {
        match self {
            Self::Blue => "charts.blue",
            Self::Green => "charts.green",
            Self::Orange => "charts.orange",
            Self::Red => "charts.red",
            Self::Yellow => "charts.yellow",
            Self::Foreground => "foreground",
        }
    }
}

/// Badge shown next to a request node, derived from its method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodBadge {
    /// Method text as stored.
    pub label: String,
    /// Icon colour.
    pub color: TintColor,
}

impl MethodBadge {
    /// Maps a method token to its badge. Unknown methods use the foreground colour.
    #[must_use]
    pub fn for_method(method: &str) -> Self {
        let color = match method.to_ascii_uppercase().as_str() {
            "GET" => TintColor::Blue,
            "POST" => TintColor::Green,
            "PUT" => TintColor::Orange,
            "DELETE" => TintColor::Red,
            "PATCH" => TintColor::Yellow,
            _ => TintColor::Foreground,
        };
        Self {
            label: method.to_string(),
            color,
        }
    }
}

/// Icon colour of a folder node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FolderTint(pub TintColor);

impl FolderTint {
    /// Picks a colour from the leading digits of the id, modulo five.
    ///
    /// Ids without leading digits get the foreground colour.
    #[must_use]
    pub fn for_id(id: &str) -> Self {
        let digits: String = id
            .trim_start()
            .chars()
            .take_while(char::is_ascii_digit)
            .collect();
        let len = TintColor::FOLDER_CYCLE.len();
        let index = if digits.is_empty() {
            None
        } else {
            // Reduce digit by digit so oversized ids cannot overflow.
            Some(digits.bytes().fold(0_usize, |acc, b| {
                (acc * 10 + usize::from(b - b'0')) % len
            }))
        };
        Self(index.map_or(TintColor::Foreground, |i| TintColor::FOLDER_CYCLE[i]))
    }
}

/// Action the host runs when a node is activated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", content = "id", rename_all = "kebab-case")]
pub enum TreeAction {
    /// Open the request in the panel.
    LoadRequest(Id),
}

/// What a node represents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TreeNodeKind {
    /// A folder; expandable.
    Folder {
        /// Icon colour.
        tint: FolderTint,
    },
    /// A saved request; a leaf.
    Request {
        /// Method badge.
        badge: MethodBadge,
        /// Activation action.
        action: TreeAction,
    },
}

/// A composed node ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    /// Id of the underlying folder or request.
    pub id: Id,
    /// Display label.
    pub label: String,
    /// Hover text.
    pub tooltip: String,
    /// Secondary text shown after the label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Node kind.
    #[serde(flatten)]
    pub kind: TreeNodeKind,
}

impl TreeNode {
    /// Builds a collapsible folder node.
    #[must_use]
    pub fn folder(folder: &Folder) -> Self {
        Self {
            id: folder.id.clone(),
            label: folder.name.clone(),
            tooltip: folder.name.clone(),
            description: None,
            kind: TreeNodeKind::Folder {
                tint: FolderTint::for_id(&folder.id),
            },
        }
    }

    /// Builds a request leaf.
    #[must_use]
    pub fn request(request: &SavedRequest) -> Self {
        Self {
            id: request.id.clone(),
            label: request.name.clone(),
            tooltip: format!("{} {}", request.method, request.name),
            description: Some(request.method.clone()),
            kind: TreeNodeKind::Request {
                badge: MethodBadge::for_method(&request.method),
                action: TreeAction::LoadRequest(request.id.clone()),
            },
        }
    }

    /// Returns true if the node can be expanded.
    #[must_use]
    pub const fn is_expandable(&self) -> bool {
        matches!(self.kind, TreeNodeKind::Folder { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::RequestPatch;
    use chrono::DateTime;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_method_badge_mapping() {
        assert_eq!(MethodBadge::for_method("GET").color, TintColor::Blue);
        assert_eq!(MethodBadge::for_method("post").color, TintColor::Green);
        assert_eq!(MethodBadge::for_method("PUT").color, TintColor::Orange);
        assert_eq!(MethodBadge::for_method("DELETE").color, TintColor::Red);
        assert_eq!(MethodBadge::for_method("PATCH").color, TintColor::Yellow);
        assert_eq!(MethodBadge::for_method("PURGE").color, TintColor::Foreground);
        assert_eq!(MethodBadge::for_method("").color, TintColor::Foreground);
    }

    #[test]
    fn test_folder_tint_cycles_by_id() {
        assert_eq!(FolderTint::for_id("1700000000000").0, TintColor::Blue);
        assert_eq!(FolderTint::for_id("1700000000003").0, TintColor::Red);
        assert_eq!(FolderTint::for_id("99999999999999999999999").0, TintColor::Yellow);
        assert_eq!(FolderTint::for_id("abc").0, TintColor::Foreground);
        assert_eq!(TintColor::Orange.theme_token(), "charts.orange");
    }

    #[test]
    fn test_request_node_tooltip_and_action() {
        let now = DateTime::from_timestamp_millis(0).unwrap_or_default();
        let request = RequestPatch::new()
            .with_name("List users")
            .with_method("DELETE")
            .into_request("r1".into(), "Untitled", now);
        let node = TreeNode::request(&request);

        assert_eq!(node.tooltip, "DELETE List users");
        assert_eq!(node.description.as_deref(), Some("DELETE"));
        assert!(!node.is_expandable());
        assert_eq!(
            node.kind,
            TreeNodeKind::Request {
                badge: MethodBadge::for_method("DELETE"),
                action: TreeAction::LoadRequest("r1".into()),
            }
        );
    }
}
