// Linear traversal: Vec vs linked list vs linked list in shuffled memory order.
//
// All three hold 0..n in traversal order. The lists differ only in where
// their nodes sit in memory: allocated in traversal order, or linked in a
// random permutation of their allocation order.

use rand::seq::SliceRandom;
use rand::Rng;

pub fn iota(n: usize) -> Vec<i32> {
    (0..n).map(|i| i as i32).collect()
}

pub fn sum_slice(data: &[i32]) -> i64 {
    data.iter().map(|&x| i64::from(x)).sum()
}

struct Node {
    value: i32,
    next: Option<Box<Node>>,
}

pub struct LinkedList {
    head: Option<Box<Node>>,
    len: usize,
}

impl LinkedList {
    /// Nodes allocated one after another in traversal order.
    pub fn sequential(n: usize) -> Self {
        Self::link(allocate(n))
    }

    /// Nodes allocated in order, then linked in a random permutation.
    pub fn shuffled<R: Rng>(n: usize, rng: &mut R) -> Self {
        let mut nodes = allocate(n);
        nodes.shuffle(rng);
        Self::link(nodes)
    }

    fn link(nodes: Vec<Box<Node>>) -> Self {
        let len = nodes.len();
        let mut head = None;
        for mut node in nodes.into_iter().rev() {
            node.next = head;
            head = Some(node);
        }

        let mut list = LinkedList { head, len };
        let mut current = list.head.as_deref_mut();
        let mut value = 0;
        while let Some(node) = current {
            node.value = value;
            value += 1;
            current = node.next.as_deref_mut();
        }
        list
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            current: self.head.as_deref(),
        }
    }

    pub fn sum(&self) -> i64 {
        self.iter().map(i64::from).sum()
    }
}

fn allocate(n: usize) -> Vec<Box<Node>> {
    (0..n).map(|_| Box::new(Node { value: 0, next: None })).collect()
}

// Unlinks iteratively; the default recursive drop overflows the stack on
// long lists.
impl Drop for LinkedList {
    fn drop(&mut self) {
        let mut current = self.head.take();
        while let Some(mut node) = current {
            current = node.next.take();
        }
    }
}

pub struct Iter<'a> {
    current: Option<&'a Node>,
}

impl Iterator for Iter<'_> {
    type Item = i32;

    fn next(&mut self) -> Option<i32> {
        let node = self.current?;
        self.current = node.next.as_deref();
        Some(node.value)
    }
}
