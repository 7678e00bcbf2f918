use std::cmp::Ordering;

use crate::common::{MedrecError, PatientId, Result};
use crate::record::Patient;

struct Node {
    patient: Patient,
    left: Option<Box<Node>>,
    right: Option<Box<Node>>,
}

impl Node {
    fn new(patient: Patient) -> Self {
        Self {
            patient,
            left: None,
            right: None,
        }
    }
}

/// The authoritative patient database: an ordered map keyed by `PatientId`,
/// realized as an unbalanced binary search tree.
///
/// Lookup and removal cost O(height), which degrades to O(n) under adversarial
/// insertion order; acceptable for an interactive single-user session. In-order
/// traversal yields records in ascending ID order, which is also the order the
/// persistence layer writes them in.
///
/// Uniqueness is enforced here: inserting an ID that is already present is
/// rejected rather than silently shadowed.
pub struct RecordStore {
    root: Option<Box<Node>>,
    len: usize,
}

impl RecordStore {
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Inserts a patient record keyed by its ID.
    /// Fails with `DuplicateId` if the ID is already present.
    pub fn insert(&mut self, patient: Patient) -> Result<()> {
        Self::insert_node(&mut self.root, patient)?;
        self.len += 1;
        Ok(())
    }

    fn insert_node(link: &mut Option<Box<Node>>, patient: Patient) -> Result<()> {
        match link {
            None => {
                *link = Some(Box::new(Node::new(patient)));
                Ok(())
            }
            Some(node) => match patient.id().cmp(&node.patient.id()) {
                Ordering::Less => Self::insert_node(&mut node.left, patient),
                Ordering::Greater => Self::insert_node(&mut node.right, patient),
                Ordering::Equal => Err(MedrecError::DuplicateId(patient.id())),
            },
        }
    }

    /// Point lookup by ID.
    pub fn get(&self, id: PatientId) -> Option<&Patient> {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            match id.cmp(&node.patient.id()) {
                Ordering::Less => current = node.left.as_deref(),
                Ordering::Greater => current = node.right.as_deref(),
                Ordering::Equal => return Some(&node.patient),
            }
        }
        None
    }

    /// Point lookup by ID, mutable. The ID itself is not reachable for
    /// mutation through this reference, so the tree order cannot be broken.
    pub fn get_mut(&mut self, id: PatientId) -> Option<&mut Patient> {
        let mut current = self.root.as_deref_mut();
        while let Some(node) = current {
            match id.cmp(&node.patient.id()) {
                Ordering::Less => current = node.left.as_deref_mut(),
                Ordering::Greater => current = node.right.as_deref_mut(),
                Ordering::Equal => return Some(&mut node.patient),
            }
        }
        None
    }

    pub fn contains(&self, id: PatientId) -> bool {
        self.get(id).is_some()
    }

    /// Removes the record with the given ID and returns it.
    /// Fails with `PatientNotFound` if absent.
    ///
    /// A node with two children is replaced by its in-order predecessor (the
    /// rightmost node of its left subtree), which reduces the removal to the
    /// leaf or one-child case and preserves ascending order of the remainder.
    pub fn remove(&mut self, id: PatientId) -> Result<Patient> {
        let removed = Self::remove_node(&mut self.root, id)?;
        self.len -= 1;
        Ok(removed)
    }

    fn remove_node(link: &mut Option<Box<Node>>, id: PatientId) -> Result<Patient> {
        let node = match link {
            None => return Err(MedrecError::PatientNotFound(id)),
            Some(node) => node,
        };

        match id.cmp(&node.patient.id()) {
            Ordering::Less => Self::remove_node(&mut node.left, id),
            Ordering::Greater => Self::remove_node(&mut node.right, id),
            Ordering::Equal => Ok(Self::unlink(link)),
        }
    }

    /// Detaches the node at `link`, which must be occupied, and returns its
    /// record after repairing the tree structure around it.
    fn unlink(link: &mut Option<Box<Node>>) -> Patient {
        let mut node = link.take().expect("unlink called on an empty link");

        match (node.left.take(), node.right.take()) {
            // Leaf: just drop the node.
            (None, None) => node.patient,

            // One child: splice the child into the parent's slot.
            (Some(child), None) | (None, Some(child)) => {
                *link = Some(child);
                node.patient
            }

            // Two children: replace the record with its in-order predecessor,
            // removed from the left subtree.
            (Some(left), Some(right)) => {
                node.left = Some(left);
                node.right = Some(right);
                let predecessor = Self::detach_max(&mut node.left);
                let removed = std::mem::replace(&mut node.patient, predecessor);
                *link = Some(node);
                removed
            }
        }
    }

    /// Detaches and returns the record of the rightmost node of a non-empty
    /// subtree. That node has no right child, so removal is a leaf or
    /// one-child splice.
    fn detach_max(link: &mut Option<Box<Node>>) -> Patient {
        let has_right = link.as_ref().map_or(false, |node| node.right.is_some());
        if has_right {
            let node = link.as_mut().expect("subtree checked non-empty");
            Self::detach_max(&mut node.right)
        } else {
            let mut node = link
                .take()
                .expect("detach_max requires a non-empty subtree");
            *link = node.left.take();
            node.patient
        }
    }

    /// Lazy in-order traversal: yields records in ascending ID order.
    /// Each call starts a fresh traversal over the current tree.
    pub fn iter(&self) -> InOrderIter<'_> {
        InOrderIter::new(self.root.as_deref())
    }

    /// Collects all patient IDs in ascending order.
    pub fn ids(&self) -> Vec<PatientId> {
        self.iter().map(|p| p.id()).collect()
    }
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over the store in ascending ID order.
///
/// Holds the left spine of the unvisited portion on an explicit stack, so
/// traversal cost is amortized O(1) per record and O(height) space.
pub struct InOrderIter<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> InOrderIter<'a> {
    fn new(root: Option<&'a Node>) -> Self {
        let mut iter = Self { stack: Vec::new() };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut node: Option<&'a Node>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left.as_deref();
        }
    }
}

impl<'a> Iterator for InOrderIter<'a> {
    type Item = &'a Patient;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        Some(&node.patient)
    }
}

impl<'a> IntoIterator for &'a RecordStore {
    type Item = &'a Patient;
    type IntoIter = InOrderIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
