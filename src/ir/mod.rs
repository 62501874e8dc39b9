//! Three-address code builder and the tree-walking translator that drives it.

use crate::parser_gen::ParseTreeNode;
use thiserror::Error;

/// One three-address quadruple: `result = arg1 op arg2`, with `op`-specific
/// readings for `LABEL`/`GOTO`/`IF_FALSE`/`=` (see [`IRBuilder::dump`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quad {
    pub op: String,
    pub arg1: String,
    pub arg2: String,
    pub result: String,
}

/// Accumulates quadruples plus the two monotonic counters that name fresh
/// temporaries and labels. One instance per translation run; never shared
/// or cloned across runs.
#[derive(Debug, Default)]
pub struct IRBuilder {
    quads: Vec<Quad>,
    next_temp: usize,
    next_label: usize,
}

impl IRBuilder {
    pub fn new() -> Self {
        IRBuilder::default()
    }

    pub fn new_temp(&mut self) -> String {
        self.next_temp += 1;
        format!("t{}", self.next_temp)
    }

    pub fn new_label(&mut self) -> String {
        self.next_label += 1;
        format!("L{}", self.next_label)
    }

    pub fn emit(&mut self, op: &str, arg1: &str, arg2: &str, result: &str) {
        self.quads.push(Quad {
            op: op.to_string(),
            arg1: arg1.to_string(),
            arg2: arg2.to_string(),
            result: result.to_string(),
        });
    }

    pub fn quads(&self) -> &[Quad] {
        &self.quads
    }

    fn bin_op_symbol(op: &str) -> &str {
        match op {
            "PLUS" => "+",
            "MINUS" => "-",
            "MULTIPLY" => "*",
            "DIVIDE" => "/",
            "MOD" => "%",
            "EQUAL_EQUAL" => "==",
            "NOT_EQUAL" => "!=",
            "GREATER" => ">",
            "LESS" => "<",
            "GREATER_EQUAL" => ">=",
            "LESS_EQUAL" => "<=",
            other => other,
        }
    }

    /// Renders the quadruple list as text: labels get a trailing colon and
    /// no indentation, everything else is indented four spaces.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for q in &self.quads {
            match q.op.as_str() {
                "LABEL" => out.push_str(&format!("{}:\n", q.result)),
                "GOTO" => out.push_str(&format!("    goto {}\n", q.result)),
                "IF_FALSE" => out.push_str(&format!("    ifFalse {} goto {}\n", q.arg1, q.result)),
                "=" => out.push_str(&format!("    {} = {}\n", q.result, q.arg1)),
                _ => out.push_str(&format!("    {} = {} {} {}\n", q.result, q.arg1, Self::bin_op_symbol(&q.op), q.arg2)),
            }
        }
        out
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IrError {
    #[error("unsupported parse-tree node: {0}")]
    UnsupportedNode(String),
}

fn child<'a>(node: &'a ParseTreeNode, i: usize) -> Result<&'a ParseTreeNode, IrError> {
    node.children.get(i).ok_or_else(|| IrError::UnsupportedNode(format!("{} (missing child {})", node.kind, i)))
}

/// Translates a `Program` parse tree (as produced by [`crate::parser_gen::parse_tree`]
/// over `grammar::examples::TAC_SOURCE_GRAMMAR`) into three-address code,
/// emitting quadruples into `ir`.
pub fn translate_tree(root: &ParseTreeNode, ir: &mut IRBuilder) -> Result<(), IrError> {
    if root.kind != "Program" {
        return Err(IrError::UnsupportedNode(root.kind.clone()));
    }
    gen_stmt_list(child(root, 0)?, ir)
}

fn gen_stmt_list(node: &ParseTreeNode, ir: &mut IRBuilder) -> Result<(), IrError> {
    if node.children.is_empty() {
        return Ok(());
    }
    gen_stmt(child(node, 0)?, ir)?;
    if node.children.len() > 1 {
        gen_stmt_list(child(node, 1)?, ir)?;
    }
    Ok(())
}

fn gen_stmt(node: &ParseTreeNode, ir: &mut IRBuilder) -> Result<(), IrError> {
    let first = child(node, 0)?;
    match first.kind.as_str() {
        "AssignStmt" => {
            let id = child(first, 0)?.token_text.clone();
            let expr = child(first, 2)?;
            let val = gen_expr(expr, ir)?;
            ir.emit("=", &val, "", &id);
            Ok(())
        }
        "IfStmt" => {
            let cond_node = child(first, 2)?;
            let then_node = child(first, 4)?;
            let else_part = child(first, 5)?;

            let cond = gen_expr(cond_node, ir)?;
            let l_else = ir.new_label();
            let l_end = ir.new_label();
            ir.emit("IF_FALSE", &cond, "", &l_else);
            gen_stmt(then_node, ir)?;
            ir.emit("GOTO", "", "", &l_end);
            ir.emit("LABEL", "", "", &l_else);
            if !else_part.children.is_empty() {
                gen_stmt(child(else_part, 1)?, ir)?;
            }
            ir.emit("LABEL", "", "", &l_end);
            Ok(())
        }
        "WhileStmt" => {
            let cond_node = child(first, 2)?;
            let body_node = child(first, 4)?;

            let l_begin = ir.new_label();
            let l_end = ir.new_label();
            ir.emit("LABEL", "", "", &l_begin);
            let cond = gen_expr(cond_node, ir)?;
            ir.emit("IF_FALSE", &cond, "", &l_end);
            gen_stmt(body_node, ir)?;
            ir.emit("GOTO", "", "", &l_begin);
            ir.emit("LABEL", "", "", &l_end);
            Ok(())
        }
        "Block" => gen_stmt_list(child(first, 1)?, ir),
        other => Err(IrError::UnsupportedNode(other.to_string())),
    }
}

fn gen_expr(node: &ParseTreeNode, ir: &mut IRBuilder) -> Result<String, IrError> {
    match node.kind.as_str() {
        "NUMBER" | "FLOAT_NUMBER" | "ID" => Ok(node.token_text.clone()),
        "Expr" => gen_expr(child(node, 0)?, ir),
        "Primary" => {
            if node.children.len() == 1 {
                gen_expr(child(node, 0)?, ir)
            } else {
                gen_expr(child(node, 1)?, ir)
            }
        }
        "UnaryExpr" => {
            if node.children.len() == 2 {
                let rhs = gen_expr(child(node, 1)?, ir)?;
                let tmp = ir.new_temp();
                ir.emit("MINUS", "0", &rhs, &tmp);
                Ok(tmp)
            } else {
                gen_expr(child(node, 0)?, ir)
            }
        }
        "MulExpr" | "AddExpr" | "RelExpr" => {
            let mut left = gen_expr(child(node, 0)?, ir)?;
            let mut tail = child(node, 1)?;
            while !tail.children.is_empty() {
                let op = child(tail, 0)?.kind.clone();
                let right = gen_expr(child(tail, 1)?, ir)?;
                let tmp = ir.new_temp();
                ir.emit(&op, &left, &right, &tmp);
                left = tmp;
                tail = child(tail, 2)?;
            }
            Ok(left)
        }
        other => Err(IrError::UnsupportedNode(other.to_string())),
    }
}
