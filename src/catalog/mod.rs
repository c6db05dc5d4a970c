#![doc = r#"
An ordered, key-unique index over parsed songs.

The [`Catalog`] is a binary search tree keyed by song name. Each node
owns its song and its children outright; there are no parent links, so
removal walks top-down with mutable references instead of chasing stored
back-pointers. Dropping the catalog releases every subtree before its
owner, structurally.

The catalog is memory-resident for the life of the process; discovery of
files on disk and any reporting of duplicates belong to collaborators.
"#]

use crate::file::Song;
use std::cmp::Ordering;
use thiserror::Error;

/// A song was already cataloged under this name.
///
/// The rejected song rides back to the caller; the tree is untouched.
#[derive(Debug, Error)]
#[error("duplicate song name {:?}", .0.name())]
pub struct DuplicateSong(pub Song);

/// No cataloged song carries the requested name.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("no song named {0:?}")]
pub struct NotFound(pub String);

/// The order in which [`Catalog::traverse`] visits nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalOrder {
    /// Node, then left subtree, then right subtree.
    PreOrder,
    /// Left subtree, then node, then right subtree: ascending key order.
    InOrder,
    /// Left subtree, then right subtree, then node.
    PostOrder,
}

#[derive(Debug)]
struct Node {
    song: Song,
    left: Link,
    right: Link,
}

type Link = Option<Box<Node>>;

/// A searchable library of songs, keyed uniquely by name.
#[derive(Debug, Default)]
pub struct Catalog {
    root: Link,
    len: usize,
}

impl Catalog {
    /// An empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of cataloged songs.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// True when nothing is cataloged.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Inserts a song under its name.
    ///
    /// On a key collision nothing changes and the song is handed back
    /// inside the error.
    pub fn insert(&mut self, song: Song) -> Result<(), DuplicateSong> {
        insert_node(&mut self.root, song)?;
        self.len += 1;
        Ok(())
    }

    /// Removes the song cataloged under `name`.
    pub fn remove(&mut self, name: &str) -> Result<(), NotFound> {
        remove_node(&mut self.root, name)?;
        self.len -= 1;
        Ok(())
    }

    /// Looks up a song by name.
    pub fn find(&self, name: &str) -> Option<&Song> {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            match name.cmp(node.song.name()) {
                Ordering::Less => current = node.left.as_deref(),
                Ordering::Greater => current = node.right.as_deref(),
                Ordering::Equal => return Some(&node.song),
            }
        }
        None
    }

    /// Visits every song in the given order.
    ///
    /// In-order traversal yields names in ascending lexicographic order,
    /// whatever shape the tree has taken.
    pub fn traverse<F>(&self, order: TraversalOrder, mut visitor: F)
    where
        F: FnMut(&Song),
    {
        visit(self.root.as_deref(), order, &mut visitor);
    }

    /// The cataloged names, ascending.
    pub fn names(&self) -> Vec<String> {
        let mut names = Vec::with_capacity(self.len);
        self.traverse(TraversalOrder::InOrder, |song| {
            names.push(song.name().to_owned());
        });
        names
    }
}

fn insert_node(link: &mut Link, song: Song) -> Result<(), DuplicateSong> {
    match link {
        None => {
            *link = Some(Box::new(Node {
                song,
                left: None,
                right: None,
            }));
            Ok(())
        }
        Some(node) => match song.name().cmp(node.song.name()) {
            Ordering::Equal => {
                tracing::warn!(name = song.name(), "duplicate song name rejected");
                Err(DuplicateSong(song))
            }
            Ordering::Less => insert_node(&mut node.left, song),
            Ordering::Greater => insert_node(&mut node.right, song),
        },
    }
}

fn remove_node(link: &mut Link, name: &str) -> Result<(), NotFound> {
    let Some(node) = link.as_deref_mut() else {
        return Err(NotFound(name.to_owned()));
    };
    match name.cmp(node.song.name()) {
        Ordering::Less => remove_node(&mut node.left, name),
        Ordering::Greater => remove_node(&mut node.right, name),
        Ordering::Equal => {
            if node.left.is_some()
                && let Some(right) = node.right.as_deref_mut()
            {
                // Two children: swap payloads with the in-order successor
                // (leftmost of the right subtree) so this node keeps its
                // position, then delete the successor's old slot, which
                // now holds the doomed song.
                let successor = leftmost_mut(right);
                std::mem::swap(&mut node.song, &mut successor.song);
                remove_node(&mut node.right, name)
            } else {
                // at most one child: splice it into this slot
                match std::mem::take(link) {
                    Some(boxed) => {
                        *link = boxed.left.or(boxed.right);
                        Ok(())
                    }
                    None => Err(NotFound(name.to_owned())),
                }
            }
        }
    }
}

fn leftmost_mut(node: &mut Node) -> &mut Node {
    match node.left {
        Some(ref mut left) => leftmost_mut(left),
        None => node,
    }
}

fn visit<F>(node: Option<&Node>, order: TraversalOrder, visitor: &mut F)
where
    F: FnMut(&Song),
{
    let Some(node) = node else {
        return;
    };
    match order {
        TraversalOrder::PreOrder => {
            visitor(&node.song);
            visit(node.left.as_deref(), order, visitor);
            visit(node.right.as_deref(), order, visitor);
        }
        TraversalOrder::InOrder => {
            visit(node.left.as_deref(), order, visitor);
            visitor(&node.song);
            visit(node.right.as_deref(), order, visitor);
        }
        TraversalOrder::PostOrder => {
            visit(node.left.as_deref(), order, visitor);
            visit(node.right.as_deref(), order, visitor);
            visitor(&node.song);
        }
    }
}
