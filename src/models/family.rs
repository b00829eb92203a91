use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::client::Resource;
use crate::table::{Column, Tabular};

/// Article family. Families nest through `parent_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Family {
    pub id: Uuid,
    #[validate(length(min = 1, max = 32))]
    pub code: String,
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<Uuid>,
}

impl Family {
    /// Renders the ancestry of `id` as "Root > Child > Leaf".
    ///
    /// Stops at the first missing parent. The walk is bounded by the number of
    /// families, so a malformed parent chain cannot loop forever.
    pub fn path(families: &[Family], id: Uuid) -> Option<String> {
        let mut current = families.iter().find(|f| f.id == id)?;
        let mut names = vec![current.name.as_str()];

        for _ in 0..families.len() {
            let Some(parent_id) = current.parent_id else {
                break;
            };
            match families.iter().find(|f| f.id == parent_id) {
                Some(parent) => {
                    names.push(parent.name.as_str());
                    current = parent;
                }
                None => break,
            }
        }

        names.reverse();
        Some(names.join(" > "))
    }

    pub fn children<'a>(families: &'a [Family], id: Uuid) -> impl Iterator<Item = &'a Family> {
        families.iter().filter(move |f| f.parent_id == Some(id))
    }
}

impl Resource for Family {
    const PATH: &'static str = "family";
    const LABEL: &'static str = "Family";

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Tabular for Family {
    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("code", "Code", |f: &Family| f.code.as_str().into()),
            Column::new("name", "Name", |f: &Family| f.name.as_str().into()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn family(name: &str, parent: Option<Uuid>) -> Family {
        Family {
            id: Uuid::new_v4(),
            code: name.to_uppercase(),
            name: name.into(),
            parent_id: parent,
        }
    }

    #[test]
    fn path_walks_to_root() {
        let root = family("Hydraulics", None);
        let child = family("Pumps", Some(root.id));
        let leaf = family("Seals", Some(child.id));
        let families = vec![leaf.clone(), root, child.clone()];

        assert_eq!(
            Family::path(&families, leaf.id).as_deref(),
            Some("Hydraulics > Pumps > Seals")
        );
        assert_eq!(Family::children(&families, child.id).count(), 1);
    }

    #[test]
    fn path_terminates_on_parent_cycle() {
        let mut a = family("A", None);
        let b = family("B", Some(a.id));
        a.parent_id = Some(b.id);
        let families = vec![a.clone(), b];

        let path = Family::path(&families, a.id).unwrap();
        assert!(path.ends_with('A'));
        assert!(path.split(" > ").count() <= 3);
    }

    #[test]
    fn unknown_id_has_no_path() {
        assert!(Family::path(&[], Uuid::new_v4()).is_none());
    }
}
