use std::collections::HashMap;

use super::graph::{SpaceEdge, SpaceGraph};
use crate::models::room::{RoomInfoMinimal, RoomRow, RoomStatus};
use crate::models::space::SpaceInfoMinimal;

pub const MAX_DEPTH: u32 = 8;

/// Snapshot of every known room plus the space→child edges between them.
///
/// Child lists keep edge order. Only edges between joined spaces feed the
/// cycle-free [`SpaceGraph`]; edges to plain rooms cannot form cycles.
pub struct Hierarchy {
    rooms: Vec<RoomRow>,
    index: HashMap<String, usize>,
    children: HashMap<String, Vec<String>>,
    parents: HashMap<String, Vec<String>>,
    graph: SpaceGraph,
}

impl Hierarchy {
    pub fn new(rooms: Vec<RoomRow>, edges: Vec<SpaceEdge>) -> Self {
        let index: HashMap<String, usize> = rooms
            .iter()
            .enumerate()
            .map(|(i, r)| (r.id.clone(), i))
            .collect();

        let mut children: HashMap<String, Vec<String>> = HashMap::new();
        let mut parents: HashMap<String, Vec<String>> = HashMap::new();
        for edge in &edges {
            children
                .entry(edge.from.clone())
                .or_default()
                .push(edge.to.clone());
            parents
                .entry(edge.to.clone())
                .or_default()
                .push(edge.from.clone());
        }

        let mut hierarchy = Self {
            rooms,
            index,
            children,
            parents,
            graph: SpaceGraph::default(),
        };
        let space_edges: Vec<SpaceEdge> = edges
            .into_iter()
            .filter(|e| hierarchy.is_joined_space(&e.from) && hierarchy.is_joined_space(&e.to))
            .collect();
        hierarchy.graph = SpaceGraph::build(space_edges);
        hierarchy
    }

    pub fn contains(&self, room_id: &str) -> bool {
        self.index.contains_key(room_id)
    }

    pub fn room(&self, room_id: &str) -> Option<&RoomRow> {
        self.index.get(room_id).map(|&i| &self.rooms[i])
    }

    pub fn is_space(&self, room_id: &str) -> bool {
        self.room(room_id).is_some_and(|r| r.is_space)
    }

    fn is_joined_space(&self, room_id: &str) -> bool {
        self.room(room_id)
            .is_some_and(|r| r.is_space && r.status == RoomStatus::Joined)
    }

    /// Number of child edges, whether or not the children are known locally.
    pub fn children_count(&self, space_id: &str) -> u64 {
        self.children.get(space_id).map_or(0, |c| c.len() as u64)
    }

    fn is_valid_parent(&self, parent: &str, child: &str) -> bool {
        if !self.is_joined_space(parent) {
            return false;
        }
        if self.is_joined_space(child) {
            return self.graph.is_valid_child(parent, child);
        }
        true
    }

    /// Joined spaces that no other joined space contains.
    pub fn top_level_spaces(&self) -> Vec<SpaceInfoMinimal> {
        self.rooms
            .iter()
            .filter(|r| r.is_space && r.status == RoomStatus::Joined)
            .filter(|r| !self.graph.is_nested(&r.id))
            .map(|r| SpaceInfoMinimal {
                room_id: r.id.clone(),
                display_name: r.display_name.clone(),
                avatar_url: r.avatar_url.clone(),
                children_count: self.children_count(&r.id),
            })
            .collect()
    }

    /// Visible children of `space_id`, in edge order. `None` if the id is
    /// not a known space. With `depth > 1` joined child spaces come with
    /// their own children filled in.
    pub fn rooms_in(&self, space_id: &str, depth: u32) -> Option<Vec<RoomInfoMinimal>> {
        if !self.is_space(space_id) {
            return None;
        }
        Some(self.collect_children(space_id, depth.clamp(1, MAX_DEPTH)))
    }

    fn collect_children(&self, space_id: &str, depth: u32) -> Vec<RoomInfoMinimal> {
        let Some(child_ids) = self.children.get(space_id) else {
            return Vec::new();
        };

        let mut result = Vec::new();
        for child_id in child_ids {
            // Unknown rooms show up once they are synced.
            let Some(child) = self.room(child_id) else {
                continue;
            };
            if !child.status.is_visible() || !self.is_valid_parent(space_id, child_id) {
                continue;
            }

            let parent_ids = self
                .parents
                .get(child_id)
                .map(|ps| {
                    ps.iter()
                        .filter(|p| self.is_valid_parent(p, child_id))
                        .cloned()
                        .collect()
                })
                .unwrap_or_default();

            let children = (depth > 1 && self.is_joined_space(child_id))
                .then(|| self.collect_children(child_id, depth - 1));

            result.push(RoomInfoMinimal {
                room_id: child.id.clone(),
                parent_ids,
                status: child.status,
                display_name: child.display_name.clone(),
                is_space: child.is_space,
                avatar_url: child.avatar_url.clone(),
                children,
                children_count: if child.is_space {
                    self.children_count(child_id)
                } else {
                    0
                },
            });
        }
        result
    }

    /// First visible plain room of a space, used as its landing room.
    pub fn default_room(&self, space_id: &str) -> Option<&str> {
        self.children.get(space_id)?.iter().find_map(|id| {
            let room = self.room(id)?;
            (!room.is_space && room.status.is_visible()).then_some(room.id.as_str())
        })
    }

    /// `(child, parent)` pairs whose parent is not a known room.
    pub fn dangling_parents(&self) -> Vec<(String, String)> {
        let mut dangling: Vec<(String, String)> = self
            .parents
            .iter()
            .flat_map(|(child, ps)| {
                ps.iter()
                    .filter(|p| !self.contains(p))
                    .map(move |p| (child.clone(), p.clone()))
            })
            .collect();
        dangling.sort();
        dangling
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: &str, is_space: bool, status: RoomStatus) -> RoomRow {
        RoomRow {
            id: id.to_string(),
            display_name: format!("Room {id}"),
            avatar_url: String::new(),
            is_space,
            status,
        }
    }

    fn edge(from: &str, to: &str, at: i64) -> SpaceEdge {
        SpaceEdge::new(from, to, Some(at))
    }

    fn sample() -> Hierarchy {
        Hierarchy::new(
            vec![
                row("s1", true, RoomStatus::Joined),
                row("s2", true, RoomStatus::Joined),
                row("r1", false, RoomStatus::Joined),
                row("r2", false, RoomStatus::Invited),
                row("r3", false, RoomStatus::Left),
                row("r4", false, RoomStatus::Joined),
            ],
            vec![
                edge("s1", "r1", 1),
                edge("s1", "s2", 2),
                edge("s1", "r3", 3),
                edge("s2", "r2", 4),
                edge("s2", "r1", 5),
                edge("s2", "s1", 6),
                edge("s2", "missing", 7),
            ],
        )
    }

    #[test]
    fn test_top_level_excludes_nested_spaces() {
        let spaces = sample().top_level_spaces();
        assert_eq!(spaces.len(), 1);
        assert_eq!(spaces[0].room_id, "s1");
        assert_eq!(spaces[0].children_count, 3);
    }

    #[test]
    fn test_rooms_in_filters_and_keeps_order() {
        let h = sample();
        let rooms = h.rooms_in("s1", 1).unwrap();
        let ids: Vec<&str> = rooms.iter().map(|r| r.room_id.as_str()).collect();
        assert_eq!(ids, vec!["r1", "s2"]);
        assert!(rooms.iter().all(|r| r.children.is_none()));
    }

    #[test]
    fn test_children_count_is_authoritative() {
        let h = sample();
        let s2 = h
            .rooms_in("s1", 2)
            .unwrap()
            .into_iter()
            .find(|r| r.room_id == "s2")
            .unwrap();
        // s2 has four edges but only r2 and r1 are visible: s1 would be a
        // cycle and "missing" is unknown.
        assert_eq!(s2.children_count, 4);
        assert_eq!(s2.subroom_label(), "4 subrooms");
        assert_eq!(s2.loaded_children().len(), 2);
        assert!(!s2.is_fully_loaded());
    }

    #[test]
    fn test_multiple_parents() {
        let h = sample();
        let r1 = h
            .rooms_in("s2", 1)
            .unwrap()
            .into_iter()
            .find(|r| r.room_id == "r1")
            .unwrap();
        assert_eq!(r1.parent_ids, vec!["s1".to_string(), "s2".to_string()]);
    }

    #[test]
    fn test_cyclic_back_edge_not_listed() {
        let h = sample();
        let ids: Vec<String> = h
            .rooms_in("s2", 1)
            .unwrap()
            .into_iter()
            .map(|r| r.room_id)
            .collect();
        assert!(!ids.contains(&"s1".to_string()));
    }

    #[test]
    fn test_unknown_or_plain_room_is_not_a_space() {
        let h = sample();
        assert!(h.rooms_in("nope", 1).is_none());
        assert!(h.rooms_in("r1", 1).is_none());
    }

    #[test]
    fn test_depth_is_clamped() {
        let h = sample();
        let deep = h.rooms_in("s1", 1000).unwrap();
        let s2 = deep.iter().find(|r| r.room_id == "s2").unwrap();
        assert!(s2.children.is_some());
        assert_eq!(h.rooms_in("s1", 0).unwrap().len(), 2);
    }

    #[test]
    fn test_default_room_skips_spaces_and_hidden_rooms() {
        let h = Hierarchy::new(
            vec![
                row("s1", true, RoomStatus::Joined),
                row("sub", true, RoomStatus::Joined),
                row("gone", false, RoomStatus::Banned),
                row("lobby", false, RoomStatus::Joined),
            ],
            vec![edge("s1", "sub", 1), edge("s1", "gone", 2), edge("s1", "lobby", 3)],
        );
        assert_eq!(h.default_room("s1"), Some("lobby"));
        assert_eq!(h.default_room("sub"), None);
    }

    #[test]
    fn test_dangling_parents() {
        let h = Hierarchy::new(
            vec![row("r1", false, RoomStatus::Joined)],
            vec![edge("ghost", "r1", 1)],
        );
        assert_eq!(
            h.dangling_parents(),
            vec![("r1".to_string(), "ghost".to_string())]
        );
    }
}
