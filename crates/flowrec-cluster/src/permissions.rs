use flowrec_core::Permissions;

/// Reconciles node-local visibility descriptors. Most restrictive wins.
pub struct PermissionsMerger;

impl PermissionsMerger {
    /// ANDs `other` into `target`.
    pub fn merge(target: &mut Permissions, other: &Permissions) {
        *target = target.intersect(*other);
    }

    /// AND-reduction of every descriptor, `None` when there are none.
    pub fn reduce<I>(descriptors: I) -> Option<Permissions>
    where
        I: IntoIterator<Item = Permissions>,
    {
        descriptors.into_iter().reduce(Permissions::intersect)
    }
}
