//! Statement list produced by the node emitters.
//!
//! Emitters never write text directly; they build `Stmt` trees that a
//! single renderer lays out through `CodeWriter`. Nesting therefore lives in
//! the tree, and indentation is decided in one place.

use super::interpolate::comment_text;
use super::writer::CodeWriter;

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// One line of code, written as-is.
    Line(String),
    /// `// text`, sanitized to stay on one line.
    Comment(String),
    /// `header { body }`. An empty header renders a bare block.
    Block { header: String, body: Vec<Stmt> },
    /// `if (cond) { .. } else { .. }`; empty arms are omitted.
    If {
        cond: String,
        then_body: Vec<Stmt>,
        else_body: Vec<Stmt>,
    },
    /// `try { .. } catch (error) { .. }`
    Try {
        body: Vec<Stmt>,
        catch_body: Vec<Stmt>,
    },
}

impl Stmt {
    pub fn line(text: impl Into<String>) -> Self {
        Stmt::Line(text.into())
    }

    pub fn comment(text: impl Into<String>) -> Self {
        Stmt::Comment(text.into())
    }

    pub fn block(header: impl Into<String>, body: Vec<Stmt>) -> Self {
        Stmt::Block {
            header: header.into(),
            body,
        }
    }

    pub fn try_catch(body: Vec<Stmt>, catch_body: Vec<Stmt>) -> Self {
        Stmt::Try { body, catch_body }
    }
}

pub fn render(stmts: &[Stmt], w: &mut CodeWriter) {
    for stmt in stmts {
        render_stmt(stmt, w);
    }
}

fn render_stmt(stmt: &Stmt, w: &mut CodeWriter) {
    match stmt {
        Stmt::Line(text) => w.line(text),
        Stmt::Comment(text) => {
            let text = comment_text(text);
            if !text.is_empty() {
                w.line(&format!("// {}", text));
            }
        }
        Stmt::Block { header, body } => {
            w.open(header);
            render(body, w);
            w.close();
        }
        Stmt::If {
            cond,
            then_body,
            else_body,
        } => match (then_body.is_empty(), else_body.is_empty()) {
            (true, true) => {}
            (false, true) => {
                w.open(&format!("if ({})", cond));
                render(then_body, w);
                w.close();
            }
            (true, false) => {
                w.open(&format!("if (!({}))", cond));
                render(else_body, w);
                w.close();
            }
            (false, false) => {
                w.open(&format!("if ({})", cond));
                render(then_body, w);
                w.reopen("else");
                render(else_body, w);
                w.close();
            }
        },
        Stmt::Try { body, catch_body } => {
            w.open("try");
            render(body, w);
            w.reopen("catch (error)");
            render(catch_body, w);
            w.close();
        }
    }
}
