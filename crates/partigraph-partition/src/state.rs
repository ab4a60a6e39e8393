//! Partition state and its storage policies.
//!
//! A [`PartitionState`] is the triple every visibility decision is made
//! against. The facade never touches it directly; it goes through a
//! [`StateCell`], which decides how the state is owned:
//!
//! - [`LocalState`]: plain ownership, mutation needs `&mut` access
//! - [`SharedState`]: behind a `parking_lot::RwLock`, mutation through `&`

use std::collections::HashSet;

use parking_lot::RwLock;
use partigraph_core::{Element, Value};

/// Partition key, write partition and read partitions of a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionState {
    partition_key: String,
    write_partition: String,
    read_partitions: HashSet<String>,
}

impl PartitionState {
    /// Create a state from its three parts.
    pub fn new<I, P>(
        partition_key: impl Into<String>,
        write_partition: impl Into<String>,
        read_partitions: I,
    ) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        Self {
            partition_key: partition_key.into(),
            write_partition: write_partition.into(),
            read_partitions: read_partitions.into_iter().map(Into::into).collect(),
        }
    }

    /// Property key holding an element's partition.
    pub fn partition_key(&self) -> &str {
        &self.partition_key
    }

    /// Partition stamped on new elements.
    pub fn write_partition(&self) -> &str {
        &self.write_partition
    }

    /// Partitions visible to reads.
    pub fn read_partitions(&self) -> &HashSet<String> {
        &self.read_partitions
    }

    /// Whether an element tagged with `tag` is visible.
    ///
    /// Untagged elements (`None`) are visible to every view.
    pub fn is_readable(&self, tag: Option<&str>) -> bool {
        tag.is_none_or(|tag| self.read_partitions.contains(tag))
    }

    /// Like [`is_readable`](Self::is_readable), for a raw property value.
    ///
    /// A non-string value never names a readable partition.
    pub fn is_readable_value(&self, tag: Option<&Value>) -> bool {
        match tag {
            None => true,
            Some(value) => value
                .as_str()
                .is_some_and(|tag| self.read_partitions.contains(tag)),
        }
    }

    /// Read the partition property of a backend element under the current key.
    pub fn tag_of<E: Element>(&self, element: &E) -> Option<Value> {
        element.property(&self.partition_key)
    }

    pub fn set_write_partition(&mut self, partition: impl Into<String>) {
        self.write_partition = partition.into();
    }

    /// Returns `false` if the partition was already readable.
    pub fn add_read_partition(&mut self, partition: impl Into<String>) -> bool {
        self.read_partitions.insert(partition.into())
    }

    /// Returns `false` if the partition was not readable.
    pub fn remove_read_partition(&mut self, partition: &str) -> bool {
        self.read_partitions.remove(partition)
    }

    pub fn set_read_partitions<I, P>(&mut self, partitions: I)
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        self.read_partitions = partitions.into_iter().map(Into::into).collect();
    }

    pub fn set_partition_key(&mut self, key: impl Into<String>) {
        self.partition_key = key.into();
    }
}

/// Storage policy for a [`PartitionState`].
pub trait StateCell: From<PartitionState> {
    /// Run `f` against the current state.
    ///
    /// `f` sees one consistent state for its whole duration.
    fn with_state<R>(&self, f: impl FnOnce(&PartitionState) -> R) -> R;
}

/// Unsynchronized state owned by a single facade.
#[derive(Debug, Clone)]
pub struct LocalState {
    state: PartitionState,
}

impl LocalState {
    pub(crate) fn get_mut(&mut self) -> &mut PartitionState {
        &mut self.state
    }
}

impl From<PartitionState> for LocalState {
    fn from(state: PartitionState) -> Self {
        Self { state }
    }
}

impl StateCell for LocalState {
    fn with_state<R>(&self, f: impl FnOnce(&PartitionState) -> R) -> R {
        f(&self.state)
    }
}

/// State shared between threads and mutable through `&self`.
#[derive(Debug)]
pub struct SharedState {
    state: RwLock<PartitionState>,
}

impl SharedState {
    pub(crate) fn update<R>(&self, f: impl FnOnce(&mut PartitionState) -> R) -> R {
        f(&mut self.state.write())
    }
}

impl From<PartitionState> for SharedState {
    fn from(state: PartitionState) -> Self {
        Self {
            state: RwLock::new(state),
        }
    }
}

impl StateCell for SharedState {
    fn with_state<R>(&self, f: impl FnOnce(&PartitionState) -> R) -> R {
        f(&self.state.read())
    }
}
