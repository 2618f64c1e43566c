use crate::node::{Edge, NodeId};
use crate::path::{WILDCARD, is_pattern};
use crate::tree::Tree;
use crate::value::Value;
use tracing::debug;

struct Detached {
    parent: NodeId,
    bindings: Vec<String>,
    edge: Edge,
}

impl Tree {
    pub fn del<S: AsRef<str>>(&mut self, pattern: &[S]) {
        let Some((last, prefix)) = pattern.split_last() else {
            debug!("del: empty pattern ignored");
            return;
        };
        let last = last.as_ref();

        let parents = self.resolve(prefix);
        let mut removed = 0usize;
        for m in parents {
            // trailing wildcard clears every child
            if last == WILDCARD {
                let edges = std::mem::take(&mut self.nodes[m.node].edges);
                removed += edges.len();
                for e in edges {
                    self.release(e.child);
                }
            } else if let Some(e) = self.detach(m.node, last) {
                removed += 1;
                self.release(e.child);
            }
        }
        debug!(removed, "del applied");
    }

    pub fn move_path<S: AsRef<str>, D: AsRef<str>>(&mut self, src: &[S], dst: &[D]) {
        let (Some((src_last, src_prefix)), Some((dst_last, _))) =
            (src.split_last(), dst.split_last())
        else {
            debug!("move: empty path ignored");
            return;
        };
        let (src_last, dst_last) = (src_last.as_ref(), dst_last.as_ref());

        if dst_last == WILDCARD {
            debug!("move: wildcard destination label ignored");
            return;
        }

        let candidates = self.resolve(src_prefix);

        if src.len() == dst.len() {
            for m in candidates {
                self.relabel(m.node, src_last, dst_last);
            }
            return;
        }

        let embed = dst.len() > src.len();
        let suffix: &[D] = if embed {
            &dst[src.len() - 1..dst.len() - 1]
        } else {
            &[]
        };
        if is_pattern(suffix) {
            debug!("move: wildcard below the source parent ignored");
            return;
        }

        let detached: Vec<Detached> = candidates
            .into_iter()
            .filter_map(|m| {
                let edge = self.detach(m.node, src_last)?;
                Some(Detached {
                    parent: m.node,
                    bindings: m.bindings(src_prefix),
                    edge,
                })
            })
            .collect();
        debug!(count = detached.len(), embed, "move: detached edges");

        for d in detached {
            let parent = if embed {
                Some(self.walk_or_create(d.parent, suffix))
            } else {
                self.walk_bound(&dst[..dst.len() - 1], &d.bindings)
            };

            match parent {
                Some(parent) => {
                    let depth = self.nodes[parent].depth + 1;
                    self.set_depth(d.edge.child, depth);
                    self.attach(parent, dst_last, d.edge.child);
                }
                // promote target prefix is missing; the subtree is dropped
                None => {
                    debug!(label = %d.edge.label, "move: destination prefix missing, dropping subtree");
                    self.release(d.edge.child);
                }
            }
        }
    }

    pub fn append<S: AsRef<str>, D: AsRef<str>>(&mut self, src: &[S], dst: &[D]) {
        if is_pattern(src) || is_pattern(dst) {
            debug!("append: wildcard paths ignored");
            return;
        }

        let shared = src
            .iter()
            .zip(dst)
            .take_while(|(a, b)| a.as_ref() == b.as_ref())
            .count();
        if shared == src.len().min(dst.len()) {
            debug!("append: nested paths ignored");
            return;
        }

        let (Some(s), Some(d)) = (self.find(src), self.find(dst)) else {
            debug!("append: path not found");
            return;
        };
        if !self.nodes[s].is_collection || !self.nodes[d].is_collection {
            debug!("append: not a collection");
            return;
        }

        let (Value::List(mut merged), Value::List(tail)) = (self.export_node(d), self.export_node(s))
        else {
            return;
        };
        merged.extend(tail);

        self.add(dst, Some(Value::List(merged)));
        self.del(src);
    }

    fn relabel(&mut self, parent: NodeId, from: &str, to: &str) {
        if from == to || self.nodes[parent].position(from).is_none() {
            return;
        }
        // existing label under the new name is overwritten
        if let Some(existing) = self.detach(parent, to) {
            self.release(existing.child);
        }
        if let Some(pos) = self.nodes[parent].position(from) {
            self.nodes[parent].edges[pos].label = to.to_string();
        }
    }

    pub(crate) fn walk_or_create<S: AsRef<str>>(&mut self, start: NodeId, path: &[S]) -> NodeId {
        let mut cur = start;
        for seg in path {
            let seg = seg.as_ref();
            cur = match self.child(cur, seg) {
                Some(next) => next,
                None => {
                    let next = self.alloc(self.nodes[cur].depth + 1);
                    self.attach(cur, seg, next);
                    next
                }
            };
        }
        cur
    }

    fn walk_bound<S: AsRef<str>>(&self, path: &[S], bindings: &[String]) -> Option<NodeId> {
        let mut bound = bindings.iter();
        let mut cur = self.root;
        for seg in path {
            let seg = seg.as_ref();
            let label = if seg == WILDCARD {
                bound.next()?.as_str()
            } else {
                seg
            };
            cur = self.child(cur, label)?;
        }
        Some(cur)
    }
}
