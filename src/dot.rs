// Directed graph description and its DOT source

use std::collections::HashSet;
use std::fmt::Write;

pub type Attrs = Vec<(String, String)>;

fn attrs(pairs: &[(&str, &str)]) -> Attrs {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Stmt {
    Node { id: String, label: String },
    Edge { from: String, to: String },
    Subgraph(Subgraph),
}

/// Statements shared by the root graph and its subgraphs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Body {
    graph_attrs: Attrs,
    edge_attrs: Attrs,
    label: Option<String>,
    stmts: Vec<Stmt>,
}

impl Body {
    fn write(&self, out: &mut String, depth: usize) {
        let indent = "\t".repeat(depth);
        for (keyword, a) in [
            ("graph", &self.graph_attrs),
            ("edge", &self.edge_attrs),
        ] {
            if !a.is_empty() {
                let _ = writeln!(out, "{indent}{keyword} {}", attr_list(a));
            }
        }
        if let Some(label) = &self.label {
            let _ = writeln!(out, "{indent}label={}", quote(label));
        }
        for stmt in &self.stmts {
            match stmt {
                Stmt::Node { id, label } => {
                    let _ = writeln!(out, "{indent}{} [label={}]", quote(id), quote(label));
                }
                Stmt::Edge { from, to } => {
                    let _ = writeln!(out, "{indent}{} -> {}", quote(from), quote(to));
                }
                Stmt::Subgraph(sub) => {
                    let _ = writeln!(out, "{indent}subgraph {} {{", quote(&sub.name));
                    sub.body.write(out, depth + 1);
                    let _ = writeln!(out, "{indent}}}");
                }
            }
        }
    }
}

/// A named subgraph; names starting with `cluster` are drawn as a boxed region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subgraph {
    name: String,
    body: Body,
}

impl Subgraph {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            body: Body::default(),
        }
    }

    pub fn graph_attrs(mut self, pairs: &[(&str, &str)]) -> Self {
        self.body.graph_attrs = attrs(pairs);
        self
    }

    pub fn label(&mut self, label: &str) {
        self.body.label = Some(label.to_string());
    }

    pub fn node(&mut self, id: &str, label: &str) {
        self.body.stmts.push(Stmt::Node {
            id: id.to_string(),
            label: label.to_string(),
        });
    }

    pub fn edge(&mut self, from: &str, to: &str) {
        self.body.stmts.push(Stmt::Edge {
            from: from.to_string(),
            to: to.to_string(),
        });
    }
}

#[derive(Debug, Clone, Default)]
pub struct Digraph {
    comment: Option<String>,
    body: Body,
    declared: HashSet<String>,
}

impl Digraph {
    pub fn new(comment: &str) -> Self {
        Self {
            comment: Some(comment.to_string()),
            ..Default::default()
        }
    }

    pub fn graph_attrs(mut self, pairs: &[(&str, &str)]) -> Self {
        self.body.graph_attrs = attrs(pairs);
        self
    }

    pub fn edge_attrs(mut self, pairs: &[(&str, &str)]) -> Self {
        self.body.edge_attrs = attrs(pairs);
        self
    }

    /// Declare a node. Repeated declarations of the same id are ignored.
    pub fn node(&mut self, id: &str, label: &str) {
        if self.declared.insert(id.to_string()) {
            self.body.stmts.push(Stmt::Node {
                id: id.to_string(),
                label: label.to_string(),
            });
        }
    }

    pub fn edge(&mut self, from: &str, to: &str) {
        self.body.stmts.push(Stmt::Edge {
            from: from.to_string(),
            to: to.to_string(),
        });
    }

    pub fn subgraph(&mut self, sub: Subgraph) {
        self.body.stmts.push(Stmt::Subgraph(sub));
    }

    pub fn node_count(&self) -> usize {
        self.declared.len()
    }

    pub fn edges(&self) -> Vec<(&str, &str)> {
        fn collect<'a>(body: &'a Body, out: &mut Vec<(&'a str, &'a str)>) {
            for stmt in &body.stmts {
                match stmt {
                    Stmt::Edge { from, to } => out.push((from.as_str(), to.as_str())),
                    Stmt::Subgraph(sub) => collect(&sub.body, out),
                    Stmt::Node { .. } => {}
                }
            }
        }
        let mut out = Vec::new();
        collect(&self.body, &mut out);
        out
    }

    /// DOT source, as written to the `.gv` file.
    pub fn source(&self) -> String {
        let mut out = String::new();
        if let Some(comment) = &self.comment {
            for line in comment.lines() {
                let _ = writeln!(out, "// {line}");
            }
        }
        out.push_str("digraph {\n");
        self.body.write(&mut out, 1);
        out.push_str("}\n");
        out
    }
}

fn attr_list(a: &Attrs) -> String {
    let items: Vec<String> = a.iter().map(|(k, v)| format!("{k}={}", quote(v))).collect();
    format!("[{}]", items.join(" "))
}

/// Quote a DOT ID. Every ID is quoted so names with `/`, spaces or dots stay intact.
fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}
