//! Declaration scopes and name resolution through enclosing scopes.
//!
//! A [`Scope`] owns an ordered list of declarations. The link to the
//! enclosing scope is not stored in the scope itself: the containing nodes
//! own their scopes, so the chain of enclosing scopes is a borrowed
//! [`ScopeChain`] built on demand, innermost first.

use serde::{Deserialize, Serialize};

use crate::decl::Decl;
use crate::error::{SyntaxError, SyntaxResult};

/// An ordered collection of owned declarations.
///
/// Insertion order is emission order. Duplicate names are accepted; lookups
/// return the first match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scope {
    decls: Vec<Decl>,
    initializing: bool,
    allow_signal_assignment: bool,
}

impl Default for Scope {
    fn default() -> Self {
        Self::new()
    }
}

impl Scope {
    /// Creates an empty scope.
    pub fn new() -> Self {
        Self {
            decls: Vec::new(),
            initializing: false,
            allow_signal_assignment: true,
        }
    }

    /// Appends a declaration.
    pub fn add_decl(&mut self, decl: Decl) {
        self.decls.push(decl);
    }

    /// Returns the first local declaration named `name`, ignoring
    /// enclosing scopes.
    pub fn get_decl(&self, name: &str) -> Option<&Decl> {
        self.decls.iter().find(|d| d.name() == name)
    }

    /// Mutable variant of [`get_decl`](Self::get_decl).
    pub fn get_decl_mut(&mut self, name: &str) -> Option<&mut Decl> {
        self.decls.iter_mut().find(|d| d.name() == name)
    }

    /// Returns the local declarations in insertion order.
    pub fn decls(&self) -> &[Decl] {
        &self.decls
    }

    /// Returns the number of local declarations.
    pub fn len(&self) -> usize {
        self.decls.len()
    }

    /// Returns `true` if there are no local declarations.
    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    /// Whether the front-end is currently filling this scope from an
    /// initial block.
    pub fn initializing(&self) -> bool {
        self.initializing
    }

    /// Sets the [`initializing`](Self::initializing) flag.
    pub fn set_initializing(&mut self, initializing: bool) {
        self.initializing = initializing;
    }

    /// Whether signal assignments are legal in this scope. Function bodies
    /// turn this off.
    pub fn allow_signal_assignment(&self) -> bool {
        self.allow_signal_assignment
    }

    /// Sets the [`allow_signal_assignment`](Self::allow_signal_assignment) flag.
    pub fn set_allow_signal_assignment(&mut self, allow: bool) {
        self.allow_signal_assignment = allow;
    }
}

/// A borrowed view of a scope and every scope enclosing it.
///
/// The parent relation is fixed when the chain is built and cannot be
/// re-pointed afterwards.
#[derive(Debug, Clone)]
pub struct ScopeChain<'a> {
    // innermost first, never empty
    frames: Vec<&'a Scope>,
}

impl<'a> ScopeChain<'a> {
    /// A chain consisting of an outermost scope.
    pub fn root(scope: &'a Scope) -> Self {
        Self {
            frames: vec![scope],
        }
    }

    /// Returns a new chain with `inner` nested inside this one.
    pub fn nest(&self, inner: &'a Scope) -> Self {
        let mut frames = Vec::with_capacity(self.frames.len() + 1);
        frames.push(inner);
        frames.extend_from_slice(&self.frames);
        Self { frames }
    }

    /// Returns the innermost scope.
    pub fn scope(&self) -> &'a Scope {
        self.frames[0]
    }

    /// Returns `true` if the innermost scope has an enclosing scope.
    pub fn has_parent(&self) -> bool {
        self.frames.len() > 1
    }

    /// Returns the chain starting at the enclosing scope.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::NoParentScope`] on an outermost scope.
    pub fn parent(&self) -> SyntaxResult<ScopeChain<'a>> {
        if !self.has_parent() {
            return Err(SyntaxError::NoParentScope);
        }
        Ok(Self {
            frames: self.frames[1..].to_vec(),
        })
    }

    /// Returns the number of scopes in the chain.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Finds the nearest declaration of `name`, searching the innermost
    /// scope first. Inner declarations shadow outer ones.
    pub fn lookup(&self, name: &str) -> Option<&'a Decl> {
        self.frames.iter().find_map(|scope| scope.get_decl(name))
    }

    /// Returns `true` if `name` is visible from the innermost scope.
    pub fn has(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decl::ObjectDecl;
    use crate::types::Type;

    fn scope_with(decls: &[(&str, Type)]) -> Scope {
        let mut scope = Scope::new();
        for (name, ty) in decls {
            scope.add_decl(Decl::Signal(ObjectDecl::new(*name, ty.clone())));
        }
        scope
    }

    #[test]
    fn local_lookup_preserves_order() {
        let scope = scope_with(&[("a", Type::std_logic()), ("b", Type::integer())]);
        let names: Vec<_> = scope.decls().iter().map(|d| d.name()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert!(scope.get_decl("b").is_some());
        assert!(scope.get_decl("c").is_none());
    }

    #[test]
    fn duplicates_resolve_to_first() {
        let scope = scope_with(&[("a", Type::std_logic()), ("a", Type::integer())]);
        assert_eq!(scope.len(), 2);
        assert_eq!(scope.get_decl("a").unwrap().ty(), Some(&Type::std_logic()));
    }

    #[test]
    fn inner_shadows_outer() {
        let outer = scope_with(&[("x", Type::unsigned(8)), ("y", Type::boolean())]);
        let inner = scope_with(&[("x", Type::signed(4))]);
        let chain = ScopeChain::root(&outer).nest(&inner);
        assert_eq!(chain.lookup("x").unwrap().ty(), Some(&Type::signed(4)));
        // absent locally: same answer as the parent chain
        let parent = chain.parent().unwrap();
        assert_eq!(
            chain.lookup("y").unwrap().ty(),
            parent.lookup("y").unwrap().ty()
        );
    }

    #[test]
    fn missing_name_is_none() {
        let outer = scope_with(&[("x", Type::std_logic())]);
        let inner = Scope::new();
        let chain = ScopeChain::root(&outer).nest(&inner);
        assert!(chain.lookup("nope").is_none());
        assert!(!chain.has("nope"));
        assert!(chain.has("x"));
    }

    #[test]
    fn root_has_no_parent() {
        let scope = Scope::new();
        let chain = ScopeChain::root(&scope);
        assert!(!chain.has_parent());
        assert_eq!(chain.parent().unwrap_err(), SyntaxError::NoParentScope);
    }

    #[test]
    fn three_level_chain() {
        let ports = scope_with(&[("clk", Type::std_logic())]);
        let arch = scope_with(&[("count", Type::unsigned(8))]);
        let local = scope_with(&[("tmp", Type::integer())]);
        let chain = ScopeChain::root(&ports).nest(&arch).nest(&local);
        assert_eq!(chain.depth(), 3);
        assert!(chain.has("clk"));
        assert!(chain.has("count"));
        assert!(std::ptr::eq(chain.scope(), &local));
        let up = chain.parent().unwrap().parent().unwrap();
        assert!(std::ptr::eq(up.scope(), &ports));
    }

    #[test]
    fn flags() {
        let mut scope = Scope::new();
        assert!(!scope.initializing());
        assert!(scope.allow_signal_assignment());
        scope.set_initializing(true);
        scope.set_allow_signal_assignment(false);
        assert!(scope.initializing());
        assert!(!scope.allow_signal_assignment());
    }
}
