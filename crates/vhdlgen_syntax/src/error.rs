//! Contract-violation errors raised while building the syntax tree.

/// The result type for tree-building operations that check their contract.
///
/// An `Err` means the caller assembled a malformed tree: it is a front-end
/// bug, not a problem with the design being translated, and the driver is
/// expected to abort.
pub type SyntaxResult<T> = Result<T, SyntaxError>;

/// A violated construction contract.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyntaxError {
    /// `Resize` only exists for `signed` and `unsigned` vectors.
    #[error("contract violation: cannot resize expression of type {ty}")]
    ResizeNonVector {
        /// The offending type, as it would be declared.
        ty: String,
    },

    /// The parent of an outermost scope was requested.
    #[error("contract violation: scope has no parent")]
    NoParentScope,

    /// A `wait for` statement was built without a duration.
    #[error("contract violation: timed wait requires a duration expression")]
    WaitWithoutDuration,

    /// An operand was pushed onto an expression that has no operand list.
    #[error("contract violation: cannot add an operand to a {kind} expression")]
    NotAnOperandList {
        /// The kind of the receiving expression.
        kind: &'static str,
    },

    /// An initial value was set on a declaration that cannot carry one.
    #[error("contract violation: declaration '{name}' cannot have an initial value")]
    NoInitialValue {
        /// The declaration name.
        name: String,
    },
}
