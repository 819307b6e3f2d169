//! JSX ancestry report.
//!
//! Lists every markup element together with the structural nodes enclosing
//! it. Useful for seeing why an element was or was not attributed to a
//! component.

use oxc_ast::ast::{
    ArrowFunctionExpression, Class, ClassType, Function, FunctionType, JSXElement, JSXFragment,
    MethodDefinition, Program, VariableDeclarator,
};
use oxc_ast::visit::walk;
use oxc_ast::Visit;
use oxc_span::GetSpan;
use oxc_syntax::scope::ScopeFlags;
use serde::Serialize;

/// One markup element and its enclosing node kinds
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementAncestry {
    /// Tag name as written (`div`, `Foo.Bar`)
    pub tag: String,
    pub start: u32,
    pub end: u32,
    /// Innermost first, always ending with `Program`
    pub ancestors: Vec<&'static str>,
}

struct AncestryCollector<'s> {
    source: &'s str,
    stack: Vec<&'static str>,
    elements: Vec<ElementAncestry>,
}

impl AncestryCollector<'_> {
    fn enter(&mut self, kind: &'static str, f: impl FnOnce(&mut Self)) {
        self.stack.push(kind);
        f(self);
        self.stack.pop();
    }
}

impl<'a> Visit<'a> for AncestryCollector<'_> {
    fn visit_function(&mut self, it: &Function<'a>, flags: ScopeFlags) {
        let kind = match it.r#type {
            FunctionType::FunctionDeclaration => "FunctionDeclaration",
            _ => "FunctionExpression",
        };
        self.enter(kind, |this| walk::walk_function(this, it, flags));
    }

    fn visit_arrow_function_expression(&mut self, it: &ArrowFunctionExpression<'a>) {
        self.enter("ArrowFunctionExpression", |this| {
            walk::walk_arrow_function_expression(this, it)
        });
    }

    fn visit_class(&mut self, it: &Class<'a>) {
        let kind = match it.r#type {
            ClassType::ClassDeclaration => "ClassDeclaration",
            ClassType::ClassExpression => "ClassExpression",
        };
        self.enter(kind, |this| walk::walk_class(this, it));
    }

    fn visit_method_definition(&mut self, it: &MethodDefinition<'a>) {
        self.enter("MethodDefinition", |this| {
            walk::walk_method_definition(this, it)
        });
    }

    fn visit_variable_declarator(&mut self, it: &VariableDeclarator<'a>) {
        self.enter("VariableDeclarator", |this| {
            walk::walk_variable_declarator(this, it)
        });
    }

    fn visit_jsx_element(&mut self, it: &JSXElement<'a>) {
        let name = it.opening_element.name.span();
        let tag = self
            .source
            .get(name.start as usize..name.end as usize)
            .unwrap_or_default();
        self.elements.push(ElementAncestry {
            tag: tag.to_string(),
            start: it.span.start,
            end: it.span.end,
            ancestors: self.stack.iter().rev().copied().collect(),
        });
        self.enter("JSXElement", |this| walk::walk_jsx_element(this, it));
    }

    fn visit_jsx_fragment(&mut self, it: &JSXFragment<'a>) {
        self.enter("JSXFragment", |this| walk::walk_jsx_fragment(this, it));
    }
}

/// Collect the ancestry of every markup element in document order.
pub fn collect_ancestry(program: &Program<'_>, source: &str) -> Vec<ElementAncestry> {
    let mut collector = AncestryCollector {
        source,
        stack: vec!["Program"],
        elements: Vec::new(),
    };
    collector.visit_program(program);
    collector.elements
}
