//! Single-pass component traversal.
//!
//! [`ComponentWalker`] owns all state of one extraction: the stack of
//! enclosing declarations, the [`BoundaryIndex`] and the accumulated
//! diagnostics. Boundaries are registered when their first markup element is
//! reached, and every opening tag refines the component enclosing it within
//! the same depth-first walk.

use maquette_carton::{CompactString, FxHashSet};
use oxc_ast::ast::{
    ArrowFunctionExpression, BindingPatternKind, Class, ClassType, Function, FunctionType,
    JSXElement, JSXOpeningElement, Program, VariableDeclarator,
};
use oxc_ast::visit::walk;
use oxc_ast::Visit;
use oxc_syntax::scope::ScopeFlags;

use crate::boundary::{Declaration, Located};
use crate::diagnostics::Diagnostic;
use crate::error::{ExtractError, ExtractResult};
use crate::index::{BoundaryIndex, Registration};
use crate::refine::refine_opening_element;
use crate::rules::ModelRules;

/// Result of walking one program
#[derive(Debug, Default)]
pub struct Extraction {
    pub index: BoundaryIndex,
    pub diagnostics: Vec<Diagnostic>,
}

enum Frame {
    /// Variable declarator; `None` for destructuring patterns
    Binding(Option<CompactString>),
    Declaration {
        declaration: Declaration,
        /// Cached outcome of locating this declaration
        located: Option<bool>,
    },
    /// Function expressions, methods and class expressions.
    /// An arrow never takes its name from a binding outside one of these.
    Barrier,
}

pub struct ComponentWalker<'r> {
    rules: &'r ModelRules,
    frames: Vec<Frame>,
    index: BoundaryIndex,
    diagnostics: Vec<Diagnostic>,
    /// Declaration starts already reported as invalid
    reported: FxHashSet<u32>,
    /// Whether the current element's innermost declaration is a component
    refining: bool,
    error: Option<ExtractError>,
}

impl<'r> ComponentWalker<'r> {
    pub fn new(rules: &'r ModelRules) -> Self {
        Self {
            rules,
            frames: Vec::new(),
            index: BoundaryIndex::new(),
            diagnostics: Vec::new(),
            reported: FxHashSet::default(),
            refining: false,
            error: None,
        }
    }

    /// Consume the walker, surfacing the first fatal error.
    pub fn finish(self) -> ExtractResult<Extraction> {
        if let Some(err) = self.error {
            return Err(err);
        }
        Ok(Extraction {
            index: self.index,
            diagnostics: self.diagnostics,
        })
    }

    #[inline]
    fn failed(&self) -> bool {
        self.error.is_some()
    }

    fn with_frame(&mut self, frame: Frame, f: impl FnOnce(&mut Self)) {
        self.frames.push(frame);
        f(self);
        self.frames.pop();
    }

    /// Name of the variable an arrow function is bound to.
    fn arrow_binding(&self) -> Option<CompactString> {
        for frame in self.frames.iter().rev() {
            match frame {
                Frame::Binding(name) => return name.clone(),
                Frame::Declaration { .. } | Frame::Barrier => return None,
            }
        }
        None
    }

    /// Locate and register the innermost enclosing declaration.
    ///
    /// Returns whether markup at this point belongs to a component.
    fn locate_enclosing(&mut self) -> bool {
        let Some((declaration, located)) =
            self.frames.iter_mut().rev().find_map(|frame| match frame {
                Frame::Declaration {
                    declaration,
                    located,
                } => Some((declaration, located)),
                _ => None,
            })
        else {
            return false;
        };

        if let Some(is_component) = *located {
            return is_component;
        }

        let is_component = match declaration.locate() {
            Ok(Located::Boundary(boundary)) => {
                let name = boundary.name.clone();
                match self.index.register(boundary) {
                    Registration::Inserted => tracing::debug!(
                        "found {} component `{}`",
                        declaration.kind.as_str(),
                        name
                    ),
                    Registration::Replaced => {
                        tracing::debug!("component `{}` replaced by a later declaration", name)
                    }
                    Registration::Unchanged => {}
                }
                true
            }
            Ok(Located::NotComponent) => false,
            Ok(Located::Unnamed(kind)) => {
                let span = declaration.span;
                if self.reported.insert(span.start) {
                    tracing::warn!(
                        "skipping unnamed {} declaration at {}..{}",
                        kind.as_str(),
                        span.start,
                        span.end
                    );
                    self.diagnostics
                        .push(Diagnostic::invalid_declaration(kind, span.start, span.end));
                }
                false
            }
            Err(err) => {
                self.error = Some(err);
                false
            }
        };

        *located = Some(is_component);
        is_component
    }
}

impl<'a> Visit<'a> for ComponentWalker<'_> {
    fn visit_variable_declarator(&mut self, it: &VariableDeclarator<'a>) {
        let name = match &it.id.kind {
            BindingPatternKind::BindingIdentifier(id) => Some(CompactString::new(id.name.as_str())),
            _ => None,
        };
        self.with_frame(Frame::Binding(name), |walker| {
            walk::walk_variable_declarator(walker, it);
        });
    }

    fn visit_function(&mut self, it: &Function<'a>, flags: ScopeFlags) {
        if self.failed() {
            return;
        }
        let frame = if it.r#type == FunctionType::FunctionDeclaration {
            Frame::Declaration {
                declaration: Declaration::function(it),
                located: None,
            }
        } else {
            Frame::Barrier
        };
        self.with_frame(frame, |walker| walk::walk_function(walker, it, flags));
    }

    fn visit_arrow_function_expression(&mut self, it: &ArrowFunctionExpression<'a>) {
        if self.failed() {
            return;
        }
        let declaration = Declaration::arrow(it, self.arrow_binding());
        self.with_frame(
            Frame::Declaration {
                declaration,
                located: None,
            },
            |walker| walk::walk_arrow_function_expression(walker, it),
        );
    }

    fn visit_class(&mut self, it: &Class<'a>) {
        if self.failed() {
            return;
        }
        let frame = if it.r#type == ClassType::ClassDeclaration {
            let rules = self.rules;
            Frame::Declaration {
                declaration: Declaration::class(it, |name| rules.is_component_base(name)),
                located: None,
            }
        } else {
            Frame::Barrier
        };
        self.with_frame(frame, |walker| walk::walk_class(walker, it));
    }

    fn visit_jsx_element(&mut self, it: &JSXElement<'a>) {
        if self.failed() {
            return;
        }
        let refining = self.locate_enclosing();
        let outer = std::mem::replace(&mut self.refining, refining);
        walk::walk_jsx_element(self, it);
        self.refining = outer;
    }

    fn visit_jsx_opening_element(&mut self, it: &JSXOpeningElement<'a>) {
        if self.failed() {
            return;
        }
        if self.refining {
            if let Err(err) = refine_opening_element(&mut self.index, it, self.rules) {
                self.error = Some(err);
                return;
            }
        }
        walk::walk_jsx_opening_element(self, it);
    }
}

/// Walk `program`, discovering and refining every component in it.
pub fn walk_program(program: &Program<'_>, rules: &ModelRules) -> ExtractResult<Extraction> {
    let mut walker = ComponentWalker::new(rules);
    walker.visit_program(program);
    walker.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::DeclarationKind;
    use crate::diagnostics::DiagnosticKind;
    use crate::source::{parse_program, ParseOptions};
    use oxc_allocator::Allocator;

    fn walk_source(source: &str) -> ExtractResult<Extraction> {
        let allocator = Allocator::default();
        let program = parse_program(&allocator, source, ParseOptions::default()).unwrap();
        walk_program(&program, &ModelRules::default())
    }

    fn names(extraction: &Extraction) -> Vec<&str> {
        extraction.index.iter().map(|b| b.name.as_str()).collect()
    }

    #[test]
    fn test_function_and_arrow_components() {
        let extraction = walk_source(
            r#"
            function Header({ title }) { return <h1 title={title} />; }
            const Footer = ({ year, children }) => <footer>{children}</footer>;
            "#,
        )
        .unwrap();
        assert_eq!(names(&extraction), vec!["Header", "Footer"]);

        let footer = extraction.index.get("Footer").unwrap();
        assert_eq!(footer.kind, DeclarationKind::Arrow);
        assert!(footer.has_children);
        assert_eq!(footer.properties.names().collect::<Vec<_>>(), vec!["year"]);
    }

    #[test]
    fn test_declaration_without_markup_is_not_a_component() {
        let extraction = walk_source("function add({ a, b }) { return a + b; }").unwrap();
        assert!(extraction.index.is_empty());
    }

    #[test]
    fn test_markup_outside_declarations_is_ignored() {
        let extraction = walk_source(r#"const el = <div status="x" />;"#).unwrap();
        assert!(extraction.index.is_empty());
        assert!(extraction.diagnostics.is_empty());
    }

    #[test]
    fn test_unbound_arrow_is_reported_once() {
        let extraction = walk_source(
            r#"
            const List = ({ items }) => (
                <ul>{items.map((item) => <li><span>{item}</span></li>)}</ul>
            );
            "#,
        )
        .unwrap();
        assert_eq!(names(&extraction), vec!["List"]);
        assert_eq!(extraction.diagnostics.len(), 1);
        assert_eq!(
            extraction.diagnostics[0].kind,
            DiagnosticKind::InvalidDeclaration {
                kind: DeclarationKind::Arrow
            }
        );
    }

    #[test]
    fn test_callback_references_are_not_checked_against_the_component() {
        let extraction = walk_source(
            r#"
            const List = ({ items }) => (
                <ul>{items.map((item) => <Row value={item} />)}</ul>
            );
            "#,
        );
        assert!(extraction.is_ok());
    }

    #[test]
    fn test_anonymous_default_export_is_skipped() {
        let extraction = walk_source("export default function () { return <main />; }").unwrap();
        assert!(extraction.index.is_empty());
        assert_eq!(extraction.diagnostics.len(), 1);
        assert!(!extraction.diagnostics[0].is_error());
    }

    #[test]
    fn test_class_components_need_a_component_base() {
        let extraction = walk_source(
            r#"
            class Panel extends React.Component { render() { return <section />; } }
            class Store extends Base { render() { return <section />; } }
            "#,
        )
        .unwrap();
        assert_eq!(names(&extraction), vec!["Panel"]);
    }

    #[test]
    fn test_nested_component_gets_its_own_attributes() {
        let extraction = walk_source(
            r#"
            function Page() {
                const Badge = () => <span tone="info" />;
                return <div layout="wide"><Badge /></div>;
            }
            "#,
        )
        .unwrap();
        let page = extraction.index.get("Page").unwrap();
        let badge = extraction.index.get("Badge").unwrap();
        assert!(page.properties.contains("layout"));
        assert!(!page.properties.contains("tone"));
        assert!(badge.properties.contains("tone"));
    }

    #[test]
    fn test_undefined_reference_aborts() {
        let err = walk_source(
            r#"
            function Form({ id }) {
                return <form id={id}><Child enabled={missing} /></form>;
            }
            function Later() { return <p />; }
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ExtractError::UndefinedProperty { ref name, .. } if name == "missing"));
    }

    #[test]
    fn test_refinement_across_several_roots_is_kept() {
        let extraction = walk_source(
            r#"
            function Toggle({ on }) {
                if (on) { return <b state="on" />; }
                return <i level={2} />;
            }
            "#,
        )
        .unwrap();
        let toggle = extraction.index.get("Toggle").unwrap();
        assert_eq!(
            toggle.properties.names().collect::<Vec<_>>(),
            vec!["on", "state", "level"]
        );
    }
}
