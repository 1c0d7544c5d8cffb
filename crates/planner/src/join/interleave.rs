use crate::plan::{Plannable, ScanNode};

/// Two scans whose tables are stored interleaved: the descendant's rows are nested
/// under the rows of the ancestor with the same key prefix.
#[derive(Debug, Clone, Copy)]
pub struct InterleavedScans<'a> {
    pub ancestor: &'a ScanNode,
    pub descendant: &'a ScanNode,
}

/// Detects whether one input of a join is an interleave ancestor of the other.
///
/// Both inputs must be table scans. Joins of siblings under a common ancestor
/// are not detected.
pub fn interleaved_scans<'a>(
    left: &'a dyn Plannable,
    right: &'a dyn Plannable,
) -> Option<InterleavedScans<'a>> {
    let (left, right) = (left.as_scan()?, right.as_scan()?);

    // the descendant is nested under more levels than any of its ancestors
    let (ancestor, descendant) =
        if left.index().interleave.ancestors.len() > right.index().interleave.ancestors.len() {
            (right, left)
        } else {
            (left, right)
        };

    let target = ancestor.as_interleave_ancestor();
    let found = descendant
        .index()
        .interleave
        .ancestors
        .iter()
        .any(|a| *a == target);

    tracing::debug!(
        ancestor = %ancestor.table().name,
        descendant = %descendant.table().name,
        interleaved = found,
        "checked interleave relationship"
    );

    found.then_some(InterleavedScans {
        ancestor,
        descendant,
    })
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::plan::{tests::table, ValuesNode},
        crate::DataSourceInfo,
        def::catalog::InterleaveAncestor,
    };

    fn ancestor(table_id: u32) -> InterleaveAncestor {
        InterleaveAncestor {
            table_id,
            index_id: 1,
        }
    }

    #[test]
    fn ancestor_and_descendant() {
        let a = ScanNode::new(&table(1, "a", vec![]), None);
        let b = ScanNode::new(&table(2, "b", vec![ancestor(1)]), None);

        let scans = interleaved_scans(&a, &b).unwrap();
        assert_eq!(scans.ancestor.table().id, 1);
        assert_eq!(scans.descendant.table().id, 2);

        // either side may be the ancestor
        let scans = interleaved_scans(&b, &a).unwrap();
        assert_eq!(scans.ancestor.table().id, 1);

        let c = ScanNode::new(&table(3, "c", vec![ancestor(1), ancestor(2)]), None);
        let scans = interleaved_scans(&c, &a).unwrap();
        assert_eq!(
            (scans.ancestor.table().id, scans.descendant.table().id),
            (1, 3)
        );
    }

    #[test]
    fn unrelated_tables() {
        let a = ScanNode::new(&table(1, "a", vec![ancestor(7)]), None);
        let b = ScanNode::new(&table(2, "b", vec![ancestor(8)]), None);
        assert!(interleaved_scans(&a, &b).is_none());

        // siblings under a common ancestor
        let c = ScanNode::new(&table(3, "c", vec![ancestor(7)]), None);
        assert!(interleaved_scans(&a, &c).is_none());

        // same table joined with itself
        assert!(interleaved_scans(&a, &a).is_none());

        let values = ValuesNode::new(DataSourceInfo::default(), vec![]).unwrap();
        let d = ScanNode::new(&table(4, "d", vec![ancestor(1)]), None);
        assert!(interleaved_scans(&values, &d).is_none());
    }
}
