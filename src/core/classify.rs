//! Component classification.
//!
//! Decides whether an exported declaration is a UI component. The naming
//! heuristics are plain data (`NamePredicate`) so a policy can be assembled
//! from configuration without touching the traversal.

use swc_ecma_ast::{Callee, Expr, MemberProp};

use crate::core::symbols::{DeclNode, Declaration};
use crate::core::utils::starts_with_uppercase;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamePredicate {
    UppercaseInitial,
    Suffix(String),
    Never,
}

impl NamePredicate {
    pub fn matches(&self, name: &str) -> bool {
        match self {
            NamePredicate::UppercaseInitial => starts_with_uppercase(name),
            NamePredicate::Suffix(suffix) => !suffix.is_empty() && name.ends_with(suffix.as_str()),
            NamePredicate::Never => false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ComponentPolicy {
    /// Names a component declaration must have.
    pub component_name: NamePredicate,
    /// Exported names dropped even though they are components (icons by default).
    pub excluded_name: NamePredicate,
    /// Higher-order wrappers whose first argument may be a component.
    pub wrappers: Vec<String>,
}

impl ComponentPolicy {
    pub fn new(include_icons: bool, icon_suffix: &str, wrappers: &[String]) -> Self {
        Self {
            component_name: NamePredicate::UppercaseInitial,
            excluded_name: if include_icons {
                NamePredicate::Never
            } else {
                NamePredicate::Suffix(icon_suffix.to_string())
            },
            wrappers: wrappers.to_vec(),
        }
    }

    /// Whether `decl` has the shape of a component declaration.
    pub fn is_component(&self, decl: &Declaration) -> bool {
        if !self.component_name.matches(decl.name) {
            return false;
        }
        match decl.node {
            DeclNode::Function(_) => true,
            DeclNode::Variable(declarator) => declarator
                .init
                .as_deref()
                .is_some_and(|init| self.is_component_initializer(init)),
            _ => false,
        }
    }

    pub fn is_excluded(&self, export_name: &str) -> bool {
        self.excluded_name.matches(export_name)
    }

    /// A function literal, or a known wrapper call whose first argument is
    /// itself a component initializer.
    fn is_component_initializer(&self, expr: &Expr) -> bool {
        match InitializerShape::of(expr) {
            InitializerShape::FunctionLiteral => true,
            InitializerShape::Call { callee, first_arg } => {
                self.is_wrapper(&callee)
                    && first_arg.is_some_and(|arg| self.is_component_initializer(arg))
            }
            InitializerShape::Other => false,
        }
    }

    /// `forwardRef` matches both `forwardRef` and `React.forwardRef`.
    fn is_wrapper(&self, callee: &str) -> bool {
        self.wrappers.iter().any(|wrapper| {
            callee == wrapper
                || callee
                    .strip_suffix(wrapper.as_str())
                    .is_some_and(|prefix| prefix.ends_with('.'))
        })
    }
}

#[derive(Debug)]
pub enum InitializerShape<'a> {
    FunctionLiteral,
    Call {
        /// Dotted callee name, empty when the callee is not a plain name path.
        callee: String,
        first_arg: Option<&'a Expr>,
    },
    Other,
}

impl<'a> InitializerShape<'a> {
    pub fn of(expr: &'a Expr) -> Self {
        match expr {
            Expr::Arrow(_) | Expr::Fn(_) => InitializerShape::FunctionLiteral,
            Expr::Call(call) => {
                let callee = match &call.callee {
                    Callee::Expr(callee) => dotted_name(callee).unwrap_or_default(),
                    _ => String::new(),
                };
                InitializerShape::Call {
                    callee,
                    first_arg: call
                        .args
                        .first()
                        .filter(|arg| arg.spread.is_none())
                        .map(|arg| &*arg.expr),
                }
            }
            _ => InitializerShape::Other,
        }
    }
}

fn dotted_name(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Ident(ident) => Some(ident.sym.to_string()),
        Expr::Member(member) => {
            let MemberProp::Ident(prop) = &member.prop else {
                return None;
            };
            Some(format!("{}.{}", dotted_name(&member.obj)?, prop.sym))
        }
        _ => None,
    }
}
