use {
    super::{Plannable, PhysicalProps},
    crate::{
        join::{compute_merge_join_ordering, interleaved_scans, InterleavedScans, JoinPredicate},
        DataSourceInfo, Result,
    },
    def::{ColumnOrdering, JoinType},
};

#[derive(Debug)]
pub struct JoinNode {
    join_type: JoinType,
    left: Option<Box<dyn Plannable>>,
    right: Option<Box<dyn Plannable>>,
    predicate: JoinPredicate,
    /// Equality slots, see [`compute_merge_join_ordering`].
    merge_join_ordering: ColumnOrdering,
    props: PhysicalProps,
}

impl JoinNode {
    pub fn new(
        left: Box<dyn Plannable>,
        right: Box<dyn Plannable>,
        predicate: JoinPredicate,
    ) -> Self {
        let merge_join_ordering = compute_merge_join_ordering(
            &left.props().ordering,
            &right.props().ordering,
            &predicate.left_equality_indices,
            &predicate.right_equality_indices,
        );

        // merged columns lead the output in slot order, so slot i is output column i
        let ordering = if predicate.join_type.preserves_right() {
            vec![]
        } else {
            merge_join_ordering.clone()
        };

        Self {
            join_type: predicate.join_type,
            left: Some(left),
            right: Some(right),
            predicate,
            merge_join_ordering,
            props: PhysicalProps { ordering },
        }
    }

    pub fn join_type(&self) -> JoinType {
        self.join_type
    }

    pub fn predicate(&self) -> &JoinPredicate {
        &self.predicate
    }

    pub fn merge_join_ordering(&self) -> &ColumnOrdering {
        &self.merge_join_ordering
    }

    pub fn left(&self) -> Option<&dyn Plannable> {
        self.left.as_deref()
    }

    pub fn right(&self) -> Option<&dyn Plannable> {
        self.right.as_deref()
    }

    /// Moves the left input out of the node. Closing the node skips a taken child.
    pub fn take_left(&mut self) -> Option<Box<dyn Plannable>> {
        self.left.take()
    }

    pub fn take_right(&mut self) -> Option<Box<dyn Plannable>> {
        self.right.take()
    }

    pub fn interleaved_scans(&self) -> Option<InterleavedScans<'_>> {
        interleaved_scans(self.left.as_deref()?, self.right.as_deref()?)
    }

    fn equality_names(&self, child: Option<&dyn Plannable>, indices: &[usize]) -> String {
        indices
            .iter()
            .map(|&i| match child {
                Some(child) => child.columns().columns()[i].name.clone(),
                None => format!("#{}", i),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Plannable for JoinNode {
    fn name(&self) -> &'static str {
        "join"
    }

    fn columns(&self) -> &DataSourceInfo {
        &self.predicate.info
    }

    fn props(&self) -> &PhysicalProps {
        &self.props
    }

    fn children(&self) -> Vec<&dyn Plannable> {
        self.left().into_iter().chain(self.right()).collect()
    }

    fn attributes(&self) -> Vec<(&'static str, String)> {
        let pred = &self.predicate;
        let mut attrs = vec![("type", self.join_type.to_string())];

        if pred.num_equality_columns() > 0 {
            attrs.push((
                "equality",
                format!(
                    "({}) = ({})",
                    self.equality_names(self.left(), &pred.left_equality_indices),
                    self.equality_names(self.right(), &pred.right_equality_indices)
                ),
            ));
        }
        if let Some(cond) = &pred.on_cond {
            attrs.push(("pred", cond.to_string()));
        }
        if !self.merge_join_ordering.is_empty() {
            let order = self
                .merge_join_ordering
                .iter()
                .map(|info| {
                    let slot = info.column_index;
                    format!(
                        "{}({}={})",
                        info.direction,
                        self.equality_names(self.left(), &pred.left_equality_indices[slot..=slot]),
                        self.equality_names(self.right(), &pred.right_equality_indices[slot..=slot])
                    )
                })
                .collect::<Vec<_>>()
                .join(",");
            attrs.push(("merge join order", order));
        }
        if let Some(scans) = self.interleaved_scans() {
            attrs.push((
                "interleaved",
                format!(
                    "{} -> {}",
                    scans.ancestor.table().name,
                    scans.descendant.table().name
                ),
            ));
        }

        attrs
    }

    /// Closes the right input, then the left one. Both are closed even if the first
    /// fails; the first error is returned.
    fn close(self: Box<Self>) -> Result<()> {
        let Self { left, right, .. } = *self;

        let right = right.map_or(Ok(()), |node| node.close());
        let left = left.map_or(Ok(()), |node| node.close());

        if let (Err(_), Err(e)) = (&right, &left) {
            tracing::warn!(error = %e, "failed to close left input of join");
        }

        right.and(left)
    }
}
