//! Serialize a [`Program`] back to source text.
//!
//! Precedence-aware: parentheses are inserted only where the tree shape
//! requires them, plus the statement-start hazards (`{`, `function`,
//! `class` opening an expression statement). Strings come out
//! single-quoted, numeric literals keep their original spelling, and
//! attached comment trivia is re-emitted with its statement.

use crate::syntax::expr::{
    Argument, ArrayElement, ArrowBody, Class, ExprKind, Function, MemberProperty, MethodKind,
    ObjectProperty, PropertyKey, PropertyValue,
};
use crate::syntax::parser::get_precedence;
use crate::syntax::pattern::Pattern;
use crate::syntax::stmt::{
    DefaultExport, ForInit, ImportSpecifier, Program, StmtKind, StmtNode, VarDecl,
};
use crate::syntax::token::{Comment, TokenKind};

/// Print a whole program at column zero.
pub fn print_program(program: &Program) -> String {
    print_program_indented(program, 0)
}

/// Print a whole program with every line indented `indent` levels, for
/// embedding module bodies inside generated wrappers.
pub fn print_program_indented(program: &Program, indent: usize) -> String {
    let mut printer = Printer::new(indent);
    for stmt in &program.body {
        printer.stmt(stmt);
    }
    printer.out
}

// Expression precedence levels as seen by the printer. Binary and logical
// operators reuse the parser's table, shifted above the assignment family.
const PREC_SEQUENCE: u8 = 0;
const PREC_ASSIGN: u8 = 1;
const PREC_CONDITIONAL: u8 = 2;
const PREC_BINARY_BASE: u8 = 2; // + get_precedence(op), so 3..=12
const PREC_UNARY: u8 = 13;
const PREC_POSTFIX: u8 = 14;
const PREC_NEW_NO_ARGS: u8 = 15;
const PREC_CALL: u8 = 16;
const PREC_PRIMARY: u8 = 17;

fn precedence(expr: &ExprKind) -> u8 {
    match expr {
        ExprKind::Sequence(_) => PREC_SEQUENCE,
        ExprKind::Assignment(_) | ExprKind::Arrow(_) => PREC_ASSIGN,
        ExprKind::Conditional(_) => PREC_CONDITIONAL,
        ExprKind::Binary(b) => PREC_BINARY_BASE + get_precedence(b.op),
        ExprKind::Logical(l) => PREC_BINARY_BASE + get_precedence(l.op),
        ExprKind::Unary(_) => PREC_UNARY,
        ExprKind::Update(u) => {
            if u.prefix {
                PREC_UNARY
            } else {
                PREC_POSTFIX
            }
        }
        ExprKind::New(n) => {
            if n.arguments.is_empty() {
                PREC_NEW_NO_ARGS
            } else {
                PREC_CALL
            }
        }
        ExprKind::Call(_) | ExprKind::Member(_) => PREC_CALL,
        // Function and class expressions never need extra parens from
        // precedence alone; the statement-start hazard handles the rest.
        _ => PREC_PRIMARY,
    }
}

/// Would this expression, printed verbatim, open with a token that changes
/// the meaning of an expression statement?
fn starts_statement_hazard(expr: &ExprKind) -> bool {
    match expr {
        ExprKind::Object(_) | ExprKind::Function(_) | ExprKind::Class(_) => true,
        ExprKind::Binary(b) => starts_statement_hazard(&b.left),
        ExprKind::Logical(l) => starts_statement_hazard(&l.left),
        ExprKind::Conditional(c) => starts_statement_hazard(&c.test),
        ExprKind::Assignment(a) => starts_statement_hazard(&a.target),
        ExprKind::Sequence(s) => s
            .expressions
            .first()
            .map(|e| starts_statement_hazard(e))
            .unwrap_or(false),
        ExprKind::Member(m) => starts_statement_hazard(&m.object),
        ExprKind::Call(c) => starts_statement_hazard(&c.callee),
        ExprKind::Update(u) if !u.prefix => starts_statement_hazard(&u.operand),
        _ => false,
    }
}

struct Printer {
    out: String,
    indent: usize,
}

impl Printer {
    fn new(indent: usize) -> Self {
        Self {
            out: String::new(),
            indent,
        }
    }

    fn write(&mut self, text: &str) {
        self.out.push_str(text);
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent {
            self.out.push_str("  ");
        }
    }

    fn newline(&mut self) {
        self.out.push('\n');
    }

    // ----- statements -----

    fn stmt(&mut self, stmt: &StmtNode) {
        for comment in &stmt.leading {
            self.write_indent();
            self.comment(comment);
            self.newline();
        }
        self.write_indent();
        self.stmt_kind(&stmt.kind);
        for comment in &stmt.trailing {
            self.write(" ");
            self.comment(comment);
        }
        self.newline();
    }

    fn comment(&mut self, comment: &Comment) {
        if comment.block {
            self.write("/*");
            self.write(&comment.text);
            self.write("*/");
        } else {
            self.write("//");
            self.write(&comment.text);
        }
    }

    fn stmt_kind(&mut self, kind: &StmtKind) {
        match kind {
            StmtKind::Expression(expr_stmt) => {
                if starts_statement_hazard(&expr_stmt.expression) {
                    self.write("(");
                    self.expr(&expr_stmt.expression, PREC_SEQUENCE);
                    self.write(")");
                } else {
                    self.expr(&expr_stmt.expression, PREC_SEQUENCE);
                }
                self.write(";");
            }
            StmtKind::Empty => self.write(";"),
            StmtKind::Block(block) => self.block(&block.body),
            StmtKind::VarDecl(decl) => {
                self.var_decl(decl);
                self.write(";");
            }
            StmtKind::FunctionDecl(function) => self.function("function", function),
            StmtKind::ClassDecl(class) => self.class(class),
            StmtKind::Return(ret) => {
                self.write("return");
                if let Some(argument) = &ret.argument {
                    self.write(" ");
                    self.expr(argument, PREC_SEQUENCE);
                }
                self.write(";");
            }
            StmtKind::If(if_stmt) => {
                self.write("if (");
                self.expr(&if_stmt.test, PREC_SEQUENCE);
                self.write(")");
                self.body(&if_stmt.consequent);
                if let Some(alternate) = &if_stmt.alternate {
                    if matches!(if_stmt.consequent.kind, StmtKind::Block(_)) {
                        self.write(" else");
                    } else {
                        self.write_indent();
                        self.write("else");
                    }
                    if matches!(alternate.kind, StmtKind::If(_)) {
                        self.write(" ");
                        self.stmt_kind(&alternate.kind);
                        return;
                    }
                    self.body(alternate);
                }
            }
            StmtKind::For(for_stmt) => {
                self.write("for (");
                match &for_stmt.init {
                    Some(ForInit::VarDecl(decl)) => self.var_decl(decl),
                    Some(ForInit::Expr(expr)) => self.expr(expr, PREC_SEQUENCE),
                    None => {}
                }
                self.write("; ");
                if let Some(test) = &for_stmt.test {
                    self.expr(test, PREC_SEQUENCE);
                }
                self.write("; ");
                if let Some(update) = &for_stmt.update {
                    self.expr(update, PREC_SEQUENCE);
                }
                self.write(")");
                self.body(&for_stmt.body);
            }
            StmtKind::ForIn(for_in) => {
                self.write("for (");
                match &for_in.target {
                    ForInit::VarDecl(decl) => self.var_decl(decl),
                    ForInit::Expr(expr) => self.expr(expr, PREC_CALL),
                }
                self.write(if for_in.of { " of " } else { " in " });
                self.expr(&for_in.iterable, PREC_ASSIGN);
                self.write(")");
                self.body(&for_in.body);
            }
            StmtKind::While(while_stmt) => {
                self.write("while (");
                self.expr(&while_stmt.test, PREC_SEQUENCE);
                self.write(")");
                self.body(&while_stmt.body);
            }
            StmtKind::DoWhile(do_while) => {
                self.write("do");
                self.body(&do_while.body);
                self.write(" while (");
                self.expr(&do_while.test, PREC_SEQUENCE);
                self.write(");");
            }
            StmtKind::Break => self.write("break;"),
            StmtKind::Continue => self.write("continue;"),
            StmtKind::Switch(switch) => {
                self.write("switch (");
                self.expr(&switch.discriminant, PREC_SEQUENCE);
                self.write(") {");
                self.newline();
                self.indent += 1;
                for case in &switch.cases {
                    self.write_indent();
                    match &case.test {
                        Some(test) => {
                            self.write("case ");
                            self.expr(test, PREC_SEQUENCE);
                            self.write(":");
                        }
                        None => self.write("default:"),
                    }
                    self.newline();
                    self.indent += 1;
                    for stmt in &case.body {
                        self.stmt(stmt);
                    }
                    self.indent -= 1;
                }
                self.indent -= 1;
                self.write_indent();
                self.write("}");
            }
            StmtKind::Throw(throw) => {
                self.write("throw ");
                self.expr(&throw.argument, PREC_SEQUENCE);
                self.write(";");
            }
            StmtKind::Try(try_stmt) => {
                self.write("try ");
                self.block(&try_stmt.block);
                if let Some(handler) = &try_stmt.handler {
                    self.write(" catch ");
                    if let Some(param) = &handler.param {
                        self.write("(");
                        self.pattern(param);
                        self.write(") ");
                    }
                    self.block(&handler.body);
                }
                if let Some(finalizer) = &try_stmt.finalizer {
                    self.write(" finally ");
                    self.block(finalizer);
                }
            }
            StmtKind::Debugger => self.write("debugger;"),
            StmtKind::Import(import) => {
                self.write("import ");
                if import.specifiers.is_empty() {
                    self.string(&import.source);
                    self.write(";");
                    return;
                }
                let mut named = Vec::new();
                let mut first = true;
                for specifier in &import.specifiers {
                    match specifier {
                        ImportSpecifier::Default(name) => {
                            if !first {
                                self.write(", ");
                            }
                            self.write(name);
                            first = false;
                        }
                        ImportSpecifier::Namespace(name) => {
                            if !first {
                                self.write(", ");
                            }
                            self.write("* as ");
                            self.write(name);
                            first = false;
                        }
                        ImportSpecifier::Named { imported, local } => {
                            named.push((imported, local));
                        }
                    }
                }
                if !named.is_empty() {
                    if !first {
                        self.write(", ");
                    }
                    self.write("{");
                    for (i, (imported, local)) in named.iter().enumerate() {
                        if i > 0 {
                            self.write(", ");
                        }
                        self.write(imported);
                        if imported != local {
                            self.write(" as ");
                            self.write(local);
                        }
                    }
                    self.write("}");
                }
                self.write(" from ");
                self.string(&import.source);
                self.write(";");
            }
            StmtKind::ExportNamed(export) => {
                self.write("export ");
                if let Some(declaration) = &export.declaration {
                    self.stmt_kind(&declaration.kind);
                    return;
                }
                self.write("{");
                for (i, specifier) in export.specifiers.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    self.write(&specifier.local);
                    if specifier.local != specifier.exported {
                        self.write(" as ");
                        self.write(&specifier.exported);
                    }
                }
                self.write("}");
                if let Some(source) = &export.source {
                    self.write(" from ");
                    self.string(source);
                }
                self.write(";");
            }
            StmtKind::ExportDefault(export) => {
                self.write("export default ");
                match &export.value {
                    DefaultExport::Function(function) => self.function("function", function),
                    DefaultExport::Class(class) => self.class(class),
                    DefaultExport::Expr(expr) => {
                        self.expr(expr, PREC_ASSIGN);
                        self.write(";");
                    }
                }
            }
            StmtKind::ExportAll(export) => {
                self.write("export * from ");
                self.string(&export.source);
                self.write(";");
            }
        }
    }

    /// A single-statement body: block inline, anything else on its own line.
    fn body(&mut self, stmt: &StmtNode) {
        if let StmtKind::Block(block) = &stmt.kind {
            self.write(" ");
            self.block(&block.body);
        } else {
            self.newline();
            self.indent += 1;
            self.stmt(stmt);
            self.indent -= 1;
        }
    }

    fn block(&mut self, body: &[Box<StmtNode>]) {
        if body.is_empty() {
            self.write("{}");
            return;
        }
        self.write("{");
        self.newline();
        self.indent += 1;
        for stmt in body {
            self.stmt(stmt);
        }
        self.indent -= 1;
        self.write_indent();
        self.write("}");
    }

    fn var_decl(&mut self, decl: &VarDecl) {
        self.write(decl.kind.as_str());
        self.write(" ");
        for (i, declarator) in decl.declarators.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.pattern(&declarator.target);
            if let Some(init) = &declarator.init {
                self.write(" = ");
                self.expr(init, PREC_ASSIGN);
            }
        }
    }

    fn pattern(&mut self, pattern: &Pattern) {
        match pattern {
            Pattern::Identifier(name) => self.write(name),
            Pattern::Object(object) => {
                self.write("{");
                for (i, property) in object.properties.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    self.write(&property.key);
                    if !property.shorthand {
                        self.write(": ");
                        self.pattern(&property.value);
                    } else if let Pattern::Default(default) = &property.value {
                        self.write(" = ");
                        self.expr(&default.default, PREC_ASSIGN);
                    }
                }
                self.write("}");
            }
            Pattern::Array(array) => {
                self.write("[");
                for (i, element) in array.elements.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    if let Some(element) = element {
                        self.pattern(element);
                    }
                }
                self.write("]");
            }
            Pattern::Default(default) => {
                self.pattern(&default.pattern);
                self.write(" = ");
                self.expr(&default.default, PREC_ASSIGN);
            }
            Pattern::Rest(inner) => {
                self.write("...");
                self.pattern(inner);
            }
        }
    }

    fn function(&mut self, keyword: &str, function: &Function) {
        self.write(keyword);
        self.write(" ");
        if let Some(name) = &function.name {
            self.write(name);
        }
        self.params(&function.params);
        self.write(" ");
        self.block(&function.body);
    }

    fn params(&mut self, params: &[Pattern]) {
        self.write("(");
        for (i, param) in params.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.pattern(param);
        }
        self.write(")");
    }

    fn class(&mut self, class: &Class) {
        self.write("class");
        if let Some(name) = &class.name {
            self.write(" ");
            self.write(name);
        }
        if let Some(superclass) = &class.superclass {
            self.write(" extends ");
            self.expr(superclass, PREC_CALL);
        }
        self.write(" {");
        self.newline();
        self.indent += 1;
        for member in &class.members {
            self.write_indent();
            if member.is_static {
                self.write("static ");
            }
            match member.kind {
                MethodKind::Get => self.write("get "),
                MethodKind::Set => self.write("set "),
                MethodKind::Constructor | MethodKind::Method => {}
            }
            self.property_key(&member.key);
            self.params(&member.function.params);
            self.write(" ");
            self.block(&member.function.body);
            self.newline();
        }
        self.indent -= 1;
        self.write_indent();
        self.write("}");
    }

    // ----- expressions -----

    /// Print `expr`, parenthesized if its precedence is below `min`.
    fn expr(&mut self, expr: &ExprKind, min: u8) {
        if precedence(expr) < min {
            self.write("(");
            self.expr_inner(expr);
            self.write(")");
        } else {
            self.expr_inner(expr);
        }
    }

    fn expr_inner(&mut self, expr: &ExprKind) {
        match expr {
            ExprKind::Identifier(id) => self.write(&id.name),
            ExprKind::Number(number) => self.write(&number.raw),
            ExprKind::String(string) => self.string(&string.value),
            ExprKind::Boolean(boolean) => {
                self.write(if boolean.value { "true" } else { "false" })
            }
            ExprKind::Null(_) => self.write("null"),
            ExprKind::This(_) => self.write("this"),
            ExprKind::Regex(regex) => {
                self.write("/");
                self.write(&regex.pattern);
                self.write("/");
                self.write(&regex.flags);
            }
            ExprKind::Template(template) => {
                self.write("`");
                for (i, quasi) in template.quasis.iter().enumerate() {
                    if i > 0 {
                        self.write("}");
                    }
                    self.write(quasi);
                    if i < template.expressions.len() {
                        self.write("${");
                        self.expr(&template.expressions[i], PREC_SEQUENCE);
                    }
                }
                self.write("`");
            }
            ExprKind::Array(array) => {
                self.write("[");
                for (i, element) in array.elements.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    match element {
                        ArrayElement::Expr(expr) => self.expr(expr, PREC_ASSIGN),
                        ArrayElement::Spread(expr) => {
                            self.write("...");
                            self.expr(expr, PREC_ASSIGN);
                        }
                        ArrayElement::Hole => {}
                    }
                }
                self.write("]");
            }
            ExprKind::Object(object) => {
                if object.properties.is_empty() {
                    self.write("{}");
                    return;
                }
                self.write("{");
                for (i, property) in object.properties.iter().enumerate() {
                    if i > 0 {
                        self.write(",");
                    }
                    self.write(" ");
                    self.object_property(property);
                }
                self.write(" }");
            }
            ExprKind::Function(function) => self.function("function", function),
            ExprKind::Arrow(arrow) => {
                if let [Pattern::Identifier(name)] = arrow.params.as_slice() {
                    self.write(name);
                } else {
                    self.params(&arrow.params);
                }
                self.write(" => ");
                match &arrow.body {
                    ArrowBody::Block(body) => self.block(body),
                    ArrowBody::Expr(expr) => {
                        // `() => ({})` to keep the brace from opening a block.
                        if matches!(**expr, ExprKind::Object(_)) {
                            self.write("(");
                            self.expr(expr, PREC_SEQUENCE);
                            self.write(")");
                        } else {
                            self.expr(expr, PREC_ASSIGN);
                        }
                    }
                }
            }
            ExprKind::Class(class) => self.class(class),
            ExprKind::Unary(unary) => {
                self.write(unary.op.as_str());
                // Word operators need a space; `- -x` must not fuse to `--x`.
                let word = matches!(
                    unary.op,
                    TokenKind::Typeof | TokenKind::Void | TokenKind::Delete
                );
                let same_sign = matches!(
                    (unary.op, &*unary.operand),
                    (TokenKind::Minus, ExprKind::Unary(inner)) if inner.op == TokenKind::Minus
                ) || matches!(
                    (unary.op, &*unary.operand),
                    (TokenKind::Plus, ExprKind::Unary(inner)) if inner.op == TokenKind::Plus
                );
                if word || same_sign {
                    self.write(" ");
                }
                self.expr(&unary.operand, PREC_UNARY);
            }
            ExprKind::Update(update) => {
                if update.prefix {
                    self.write(update.op.as_str());
                    self.expr(&update.operand, PREC_UNARY);
                } else {
                    self.expr(&update.operand, PREC_POSTFIX);
                    self.write(update.op.as_str());
                }
            }
            ExprKind::Binary(binary) => {
                let prec = PREC_BINARY_BASE + get_precedence(binary.op);
                self.expr(&binary.left, prec);
                self.write(" ");
                self.write(binary.op.as_str());
                self.write(" ");
                self.expr(&binary.right, prec + 1);
            }
            ExprKind::Logical(logical) => {
                let prec = PREC_BINARY_BASE + get_precedence(logical.op);
                self.expr(&logical.left, prec);
                self.write(" ");
                self.write(logical.op.as_str());
                self.write(" ");
                self.expr(&logical.right, prec + 1);
            }
            ExprKind::Conditional(conditional) => {
                self.expr(&conditional.test, PREC_CONDITIONAL + 1);
                self.write(" ? ");
                self.expr(&conditional.consequent, PREC_ASSIGN);
                self.write(" : ");
                self.expr(&conditional.alternate, PREC_ASSIGN);
            }
            ExprKind::Assignment(assignment) => {
                self.expr(&assignment.target, PREC_POSTFIX);
                self.write(" ");
                self.write(assignment.op.as_str());
                self.write(" ");
                self.expr(&assignment.value, PREC_ASSIGN);
            }
            ExprKind::Sequence(sequence) => {
                for (i, expr) in sequence.expressions.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    self.expr(expr, PREC_ASSIGN);
                }
            }
            ExprKind::Call(call) => {
                self.expr(&call.callee, PREC_CALL);
                self.arguments(&call.arguments);
            }
            ExprKind::New(new_expr) => {
                self.write("new ");
                self.expr(&new_expr.callee, PREC_NEW_NO_ARGS);
                self.arguments(&new_expr.arguments);
            }
            ExprKind::Member(member) => {
                // A no-argument new as the object keeps its parens here
                // (PREC_NEW_NO_ARGS < PREC_CALL), so `(new F()).x` stays put.
                self.expr(&member.object, PREC_CALL);
                match &member.property {
                    MemberProperty::Dot(name) => {
                        self.write(".");
                        self.write(name);
                    }
                    MemberProperty::Computed(index) => {
                        self.write("[");
                        self.expr(index, PREC_SEQUENCE);
                        self.write("]");
                    }
                }
            }
            ExprKind::Grouping(grouping) => {
                self.write("(");
                self.expr(&grouping.expression, PREC_SEQUENCE);
                self.write(")");
            }
        }
    }

    fn object_property(&mut self, property: &ObjectProperty) {
        match &property.value {
            PropertyValue::Init(expr) => {
                self.property_key(&property.key);
                self.write(": ");
                self.expr(expr, PREC_ASSIGN);
            }
            PropertyValue::Shorthand => self.property_key(&property.key),
            PropertyValue::Method(function) => {
                self.property_key(&property.key);
                self.params(&function.params);
                self.write(" ");
                self.block(&function.body);
            }
            PropertyValue::Get(function) => {
                self.write("get ");
                self.property_key(&property.key);
                self.params(&function.params);
                self.write(" ");
                self.block(&function.body);
            }
            PropertyValue::Set(function) => {
                self.write("set ");
                self.property_key(&property.key);
                self.params(&function.params);
                self.write(" ");
                self.block(&function.body);
            }
        }
    }

    fn property_key(&mut self, key: &PropertyKey) {
        match key {
            PropertyKey::Identifier(name) => self.write(name),
            PropertyKey::String(value) => self.string(value),
            PropertyKey::Number(raw) => self.write(raw),
            PropertyKey::Computed(expr) => {
                self.write("[");
                self.expr(expr, PREC_ASSIGN);
                self.write("]");
            }
        }
    }

    fn arguments(&mut self, arguments: &[Argument]) {
        self.write("(");
        for (i, argument) in arguments.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            match argument {
                Argument::Expr(expr) => self.expr(expr, PREC_ASSIGN),
                Argument::Spread(expr) => {
                    self.write("...");
                    self.expr(expr, PREC_ASSIGN);
                }
            }
        }
        self.write(")");
    }

    /// Single-quoted string literal with re-escaping.
    fn string(&mut self, value: &str) {
        self.out.push('\'');
        for c in value.chars() {
            match c {
                '\'' => self.out.push_str("\\'"),
                '\\' => self.out.push_str("\\\\"),
                '\n' => self.out.push_str("\\n"),
                '\r' => self.out.push_str("\\r"),
                '\t' => self.out.push_str("\\t"),
                '\0' => self.out.push_str("\\0"),
                c if (c as u32) < 0x20 => {
                    self.out.push_str(&format!("\\x{:02x}", c as u32));
                }
                c => self.out.push(c),
            }
        }
        self.out.push('\'');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::parse_module;
    use bindle_config::SourceDialect;

    fn roundtrip(source: &str) -> String {
        let program =
            parse_module(source, SourceDialect::Es2015).expect("parse should succeed");
        print_program(&program)
    }

    #[test]
    fn test_print_var_decl() {
        assert_eq!(roundtrip("var a = 1, b;"), "var a = 1, b;\n");
    }

    #[test]
    fn test_print_preserves_number_spelling() {
        assert_eq!(roundtrip("var mask = 0xFF;"), "var mask = 0xFF;\n");
    }

    #[test]
    fn test_print_string_single_quoted() {
        assert_eq!(roundtrip("var s = \"it's\";"), "var s = 'it\\'s';\n");
    }

    #[test]
    fn test_precedence_parens_only_where_needed() {
        assert_eq!(roundtrip("var x = (a + b) * c;"), "var x = (a + b) * c;\n");
        assert_eq!(roundtrip("var x = a + b * c;"), "var x = a + b * c;\n");
    }

    #[test]
    fn test_left_associative_subtraction_keeps_parens_on_right() {
        assert_eq!(roundtrip("var x = a - (b - c);"), "var x = a - (b - c);\n");
        assert_eq!(roundtrip("var x = a - b - c;"), "var x = a - b - c;\n");
    }

    #[test]
    fn test_object_at_statement_start_is_parenthesized() {
        let program = crate::syntax::stmt::Program {
            body: vec![crate::syntax::stmt::StmtNode::synthetic(
                StmtKind::Expression(crate::syntax::stmt::ExpressionStmt {
                    expression: Box::new(ExprKind::Object(
                        crate::syntax::expr::ObjectLiteral { properties: vec![] },
                    )),
                }),
            )],
        };
        assert_eq!(print_program(&program), "({});\n");
    }

    #[test]
    fn test_print_function_declaration() {
        assert_eq!(
            roundtrip("function add(a, b) { return a + b; }"),
            "function add(a, b) {\n  return a + b;\n}\n"
        );
    }

    #[test]
    fn test_print_if_else() {
        assert_eq!(
            roundtrip("if (a) { b(); } else { c(); }"),
            "if (a) {\n  b();\n} else {\n  c();\n}\n"
        );
    }

    #[test]
    fn test_print_member_and_call() {
        assert_eq!(
            roundtrip("console.log(a[0], b);"),
            "console.log(a[0], b);\n"
        );
    }

    #[test]
    fn test_print_conditional() {
        assert_eq!(roundtrip("var r = a ? b : c;"), "var r = a ? b : c;\n");
    }

    #[test]
    fn test_print_new_expression() {
        assert_eq!(
            roundtrip("var e = new Error('boom');"),
            "var e = new Error('boom');\n"
        );
    }

    #[test]
    fn test_print_template() {
        assert_eq!(roundtrip("var s = `a${x}b`;"), "var s = `a${x}b`;\n");
    }

    #[test]
    fn test_print_arrow_functions() {
        assert_eq!(roundtrip("var f = x => x * 2;"), "var f = x => x * 2;\n");
        assert_eq!(
            roundtrip("var f = (a, b) => a + b;"),
            "var f = (a, b) => a + b;\n"
        );
    }

    #[test]
    fn test_print_object_literal() {
        assert_eq!(
            roundtrip("var o = { a: 1, 'b': 2 };"),
            "var o = { a: 1, 'b': 2 };\n"
        );
    }

    #[test]
    fn test_print_for_loops() {
        assert_eq!(
            roundtrip("for (var i = 0; i < 3; i++) { f(i); }"),
            "for (var i = 0; i < 3; i++) {\n  f(i);\n}\n"
        );
        assert_eq!(
            roundtrip("for (var k in o) { f(k); }"),
            "for (var k in o) {\n  f(k);\n}\n"
        );
    }

    #[test]
    fn test_print_indented_program() {
        let program =
            parse_module("var a = 1;", SourceDialect::Es2015).expect("parse should succeed");
        assert_eq!(print_program_indented(&program, 2), "    var a = 1;\n");
    }

    #[test]
    fn test_leading_comment_reemitted() {
        assert_eq!(
            roundtrip("// keep me\nvar a = 1;"),
            "// keep me\nvar a = 1;\n"
        );
    }

    #[test]
    fn test_negative_unary_chain_does_not_fuse() {
        let program = crate::syntax::stmt::Program {
            body: vec![crate::syntax::stmt::StmtNode::synthetic(
                StmtKind::Expression(crate::syntax::stmt::ExpressionStmt {
                    expression: Box::new(ExprKind::Unary(crate::syntax::expr::Unary {
                        op: TokenKind::Minus,
                        operand: Box::new(ExprKind::Unary(crate::syntax::expr::Unary {
                            op: TokenKind::Minus,
                            operand: Box::new(ExprKind::Identifier(
                                crate::syntax::expr::Identifier {
                                    name: "x".to_string(),
                                },
                            )),
                        })),
                    })),
                }),
            )],
        };
        assert_eq!(print_program(&program), "- -x;\n");
    }

    #[test]
    fn test_typeof_has_space() {
        assert_eq!(roundtrip("var t = typeof x;"), "var t = typeof x;\n");
    }

    #[test]
    fn test_print_switch() {
        assert_eq!(
            roundtrip("switch (x) { case 1: a(); break; default: b(); }"),
            "switch (x) {\n  case 1:\n    a();\n    break;\n  default:\n    b();\n}\n"
        );
    }

    #[test]
    fn test_print_import_export() {
        assert_eq!(
            roundtrip("import d, { a as b } from './m';"),
            "import d, {a as b} from './m';\n"
        );
        assert_eq!(
            roundtrip("export { a as b };"),
            "export {a as b};\n"
        );
        assert_eq!(roundtrip("export * from './m';"), "export * from './m';\n");
    }
}
