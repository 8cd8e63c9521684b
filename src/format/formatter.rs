//! Core formatting logic for datagen source code
//!
//! Walks the AST and emits canonically formatted source code. Comments are not part of the
//! AST, so they do not survive formatting.

use datagen_syntax::ast::*;

use super::config::FormatConfig;
use super::writer::FormatWriter;

/// Formatter that transforms AST back to formatted source code
pub struct Formatter {
    writer: FormatWriter,
}

impl Formatter {
    /// Create a new formatter with the given config
    pub fn new(config: FormatConfig) -> Self {
        Self {
            writer: FormatWriter::new(config),
        }
    }

    /// Format a compilation unit and return the formatted source
    pub fn format(mut self, unit: &CompilationUnit) -> String {
        self.format_unit(unit);
        self.writer.finish()
    }

    // ========================================================================
    // Compilation unit
    // ========================================================================

    fn format_unit(&mut self, unit: &CompilationUnit) {
        let blank = self.writer.config().blank_lines_top_level;
        let mut prev: Option<&Declaration> = None;

        for decl in &unit.declarations {
            if let Some(prev) = prev {
                let grouped = matches!((prev, &decl.node), (Declaration::Import(_), Declaration::Import(_)));
                if !grouped {
                    self.writer.blank_lines(blank);
                }
            }
            self.format_declaration(&decl.node);
            prev = Some(&decl.node);
        }
    }

    // ========================================================================
    // Declarations
    // ========================================================================

    fn format_declaration(&mut self, decl: &Declaration) {
        match decl {
            Declaration::Import(import) => {
                self.writer.write("import ");
                self.writer.write(&import.path.join("."));
                self.writer.writeln(";");
            }
            Declaration::Type(ty) => self.format_type_decl(ty),
            Declaration::Function(func) => self.format_method(func),
        }
    }

    fn format_annotations(&mut self, annotations: &[Spanned<Annotation>]) {
        for annotation in annotations {
            self.writer.write("@");
            self.writer.writeln(&annotation.node.dotted());
        }
    }

    fn format_visibility(&mut self, visibility: Visibility) {
        if visibility == Visibility::Public {
            self.writer.write("pub ");
        }
    }

    fn format_type_decl(&mut self, decl: &TypeDecl) {
        self.format_annotations(&decl.annotations);
        self.format_visibility(decl.visibility);
        self.writer.write("class ");
        self.writer.write(&decl.name);

        if decl.members.is_empty() {
            self.writer.writeln(" {}");
            return;
        }

        self.writer.writeln(" {");
        self.writer.indent();

        let blank = self.writer.config().blank_lines_members;
        let mut prev_was_field: Option<bool> = None;
        for member in &decl.members {
            let is_field = matches!(member.node, Member::Field(_));
            if let Some(prev_field) = prev_was_field {
                if !(prev_field && is_field) {
                    self.writer.blank_lines(blank);
                }
            }
            self.format_member(&member.node);
            prev_was_field = Some(is_field);
        }

        self.writer.dedent();
        self.writer.writeln("}");
    }

    fn format_member(&mut self, member: &Member) {
        match member {
            Member::Field(field) => self.format_field(field),
            Member::Method(method) => self.format_method(method),
            Member::Constructor(ctor) => {
                self.format_annotations(&ctor.annotations);
                self.format_visibility(ctor.visibility);
                self.writer.write("new");
                self.format_params(&ctor.params);
                self.writer.write(" ");
                self.format_block(&ctor.body);
                self.writer.newline();
            }
            Member::Initializer(body) => {
                self.writer.write("init ");
                self.format_block(body);
                self.writer.newline();
            }
            Member::Type(nested) => self.format_type_decl(nested),
        }
    }

    fn format_field(&mut self, field: &FieldDecl) {
        self.format_annotations(&field.annotations);
        self.format_visibility(field.visibility);
        self.writer.write(&field.name);
        if let Some(ty) = &field.ty {
            self.writer.write(": ");
            self.format_type(&ty.node);
        }
        if let Some(default) = &field.default {
            self.writer.write(" = ");
            self.format_expr(&default.node);
        }
        self.writer.writeln(";");
    }

    fn format_method(&mut self, method: &MethodDecl) {
        self.format_annotations(&method.annotations);
        self.format_visibility(method.visibility);
        self.writer.write("fn ");
        self.writer.write(&method.name);
        self.format_params(&method.params);
        if !method.return_type.node.is_void() {
            self.writer.write(": ");
            self.format_type(&method.return_type.node);
        }
        self.writer.write(" ");
        self.format_block(&method.body);
        self.writer.newline();
    }

    fn format_params(&mut self, params: &[Spanned<Param>]) {
        self.writer.write("(");
        for (i, param) in params.iter().enumerate() {
            if i > 0 {
                self.writer.write(", ");
            }
            self.writer.write(&param.node.name);
            self.writer.write(": ");
            self.format_type(&param.node.ty.node);
        }
        self.writer.write(")");
    }

    fn format_type(&mut self, ty: &Type) {
        self.writer.write(&ty.to_string());
    }

    // ========================================================================
    // Statements
    // ========================================================================

    /// Write `{ ... }` without a trailing newline. Empty blocks print as `{}`.
    fn format_block(&mut self, body: &[Spanned<Statement>]) {
        if body.is_empty() {
            self.writer.write("{}");
            return;
        }
        self.writer.writeln("{");
        self.writer.indent();
        for stmt in body {
            self.format_statement(&stmt.node);
        }
        self.writer.dedent();
        self.writer.write("}");
    }

    fn format_statement(&mut self, stmt: &Statement) {
        match stmt {
            Statement::Let(let_stmt) => {
                self.writer.write("let ");
                self.writer.write(&let_stmt.name);
                if let Some(ty) = &let_stmt.ty {
                    self.writer.write(": ");
                    self.format_type(&ty.node);
                }
                if let Some(value) = &let_stmt.value {
                    self.writer.write(" = ");
                    self.format_expr(&value.node);
                }
                self.writer.writeln(";");
            }
            Statement::Assign(assign) => {
                self.format_expr(&assign.target.node);
                self.writer.write(" = ");
                self.format_expr(&assign.value.node);
                self.writer.writeln(";");
            }
            Statement::Return(value) => {
                self.writer.write("return");
                if let Some(value) = value {
                    self.writer.write(" ");
                    self.format_expr(&value.node);
                }
                self.writer.writeln(";");
            }
            Statement::If(if_stmt) => {
                self.format_if(if_stmt);
                self.writer.newline();
            }
            Statement::While(while_stmt) => {
                self.writer.write("while ");
                self.format_expr(&while_stmt.condition.node);
                self.writer.write(" ");
                self.format_block(&while_stmt.body);
                self.writer.newline();
            }
            Statement::Expr(expr) => {
                self.format_expr(&expr.node);
                self.writer.writeln(";");
            }
        }
    }

    fn format_if(&mut self, if_stmt: &IfStmt) {
        self.writer.write("if ");
        self.format_expr(&if_stmt.condition.node);
        self.writer.write(" ");
        self.format_block(&if_stmt.then_body);

        if let Some(else_body) = &if_stmt.else_body {
            self.writer.write(" else ");
            match else_body.as_slice() {
                [Spanned {
                    node: Statement::If(nested),
                    ..
                }] => self.format_if(nested),
                _ => self.format_block(else_body),
            }
        }
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    fn format_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Literal(lit) => self.format_literal(lit),
            Expr::Ident(name) => self.writer.write(name),
            Expr::This => self.writer.write("this"),
            Expr::Field(base, name) => {
                self.format_expr(&base.node);
                self.writer.write(".");
                self.writer.write(name);
            }
            Expr::Call(callee, args) => {
                self.format_expr(&callee.node);
                self.format_args(args);
            }
            Expr::MethodCall(receiver, name, args) => {
                self.format_expr(&receiver.node);
                self.writer.write(".");
                self.writer.write(name);
                self.format_args(args);
            }
            Expr::Unary(op, operand) => {
                self.writer.write(&op.to_string());
                self.format_expr(&operand.node);
            }
            Expr::Binary(left, op, right) => {
                self.format_expr(&left.node);
                self.writer.write(" ");
                self.writer.write(&op.to_string());
                self.writer.write(" ");
                self.format_expr(&right.node);
            }
            Expr::Paren(inner) => {
                self.writer.write("(");
                self.format_expr(&inner.node);
                self.writer.write(")");
            }
        }
    }

    fn format_args(&mut self, args: &[Spanned<Expr>]) {
        self.writer.write("(");
        for (i, arg) in args.iter().enumerate() {
            if i > 0 {
                self.writer.write(", ");
            }
            self.format_expr(&arg.node);
        }
        self.writer.write(")");
    }

    fn format_literal(&mut self, lit: &Literal) {
        match lit {
            Literal::Int(n) => self.writer.write(&n.to_string()),
            Literal::Float(f) => self.writer.write(&format_float(*f)),
            Literal::String(s) => {
                let quote = self.writer.config().quote_style.quote_char();
                let escaped = escape_string(s, quote);
                self.writer.write_char(quote);
                self.writer.write(&escaped);
                self.writer.write_char(quote);
            }
            Literal::Bool(true) => self.writer.write("true"),
            Literal::Bool(false) => self.writer.write("false"),
            Literal::Null => self.writer.write("null"),
        }
    }
}

/// Float spelling that always lexes back as a float (never exponent form, always a `.`).
fn format_float(value: f64) -> String {
    let mut s = value.to_string();
    if value.is_finite() && !s.contains('.') {
        s.push_str(".0");
    }
    s
}

fn escape_string(s: &str, quote: char) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            '\\' => result.push_str("\\\\"),
            c if c == quote => {
                result.push('\\');
                result.push(c);
            }
            c => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_float_keeps_point() {
        assert_eq!(format_float(1.0), "1.0");
        assert_eq!(format_float(2.5), "2.5");
        assert_eq!(format_float(1e16), "10000000000000000.0");
    }

    #[test]
    fn test_escape_string_respects_quote_style() {
        assert_eq!(escape_string("say \"hi\"\n", '"'), "say \\\"hi\\\"\\n");
        assert_eq!(escape_string("it's", '\''), "it\\'s");
        assert_eq!(escape_string("it's", '"'), "it's");
    }
}
