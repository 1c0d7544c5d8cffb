use def::{ColumnOrderInfo, ColumnOrdering};

/// Computes the longest prefix of equality columns both inputs are sorted on.
///
/// Position `k` of both orderings must refer to the two columns of one equality
/// slot, with the same direction. The result lists those slots; an empty result
/// means a merge join would need to sort first.
pub fn compute_merge_join_ordering(
    left: &[ColumnOrderInfo],
    right: &[ColumnOrderInfo],
    left_equality_indices: &[usize],
    right_equality_indices: &[usize],
) -> ColumnOrdering {
    let mut ordering = vec![];

    for (l, r) in left.iter().zip(right) {
        if l.direction != r.direction {
            break;
        }

        let slot = left_equality_indices
            .iter()
            .zip(right_equality_indices)
            .position(|(&li, &ri)| li == l.column_index && ri == r.column_index);

        match slot {
            Some(slot) => ordering.push(ColumnOrderInfo::new(slot, l.direction)),
            None => break,
        }
    }

    tracing::trace!(prefix = ordering.len(), "computed merge join ordering");
    ordering
}
