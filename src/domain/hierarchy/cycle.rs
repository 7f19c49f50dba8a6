use super::{HierarchyError, Table};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

/// Rejects the table if following parent links from any record returns to a
/// record already on the same walk.
///
/// Each record is marked done once its walk reaches a root or an earlier
/// walk, so every record is visited once across all walks.
pub(super) fn ensure_acyclic(table: &Table<'_>) -> Result<(), HierarchyError> {
    let mut marks = vec![Mark::Unvisited; table.len()];
    let mut walk = Vec::new();

    for start in 0..table.len() {
        if marks[start] != Mark::Unvisited {
            continue;
        }

        let mut cursor = Some(start);
        while let Some(position) = cursor {
            match marks[position] {
                Mark::InProgress => return Err(HierarchyError::Cycle),
                Mark::Done => break,
                Mark::Unvisited => {
                    marks[position] = Mark::InProgress;
                    walk.push(position);
                    cursor = table.parent(position);
                }
            }
        }

        for position in walk.drain(..) {
            marks[position] = Mark::Done;
        }
    }

    Ok(())
}
