//! Sequential and concurrent statements.

use std::fmt::{self, Write};

use serde::{Deserialize, Serialize};

use crate::emit::{Emit, Emitter};
use crate::error::{SyntaxError, SyntaxResult};
use crate::expr::Expr;
use crate::types::Type;
use crate::unit::{ComponentInst, Process};

/// An ordered list of sequential statements.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StmtContainer {
    stmts: Vec<SeqStmt>,
}

impl StmtContainer {
    /// Creates an empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a statement.
    pub fn add_stmt(&mut self, stmt: SeqStmt) {
        self.stmts.push(stmt);
    }

    /// Returns the statements in order.
    pub fn stmts(&self) -> &[SeqStmt] {
        &self.stmts
    }

    /// Returns `true` if there are no statements.
    pub fn is_empty(&self) -> bool {
        self.stmts.is_empty()
    }
}

impl Emit for StmtContainer {
    fn emit<W: fmt::Write>(&self, out: &mut Emitter<'_, W>, level: usize) -> fmt::Result {
        out.children(&self.stmts, level, "")
    }
}

/// `lhs <= rhs [after delay];` inside a process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalAssign {
    /// The target.
    pub lhs: Expr,
    /// The driven value.
    pub rhs: Expr,
    /// Optional delay.
    pub after: Option<Expr>,
}

impl SignalAssign {
    /// Creates an assignment with no delay.
    pub fn new(lhs: Expr, rhs: Expr) -> Self {
        Self {
            lhs,
            rhs,
            after: None,
        }
    }

    /// Sets the `after` delay.
    pub fn set_after(&mut self, delay: Expr) {
        self.after = Some(delay);
    }
}

/// `lhs := rhs;`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VarAssign {
    /// The target variable.
    pub lhs: Expr,
    /// The assigned value.
    pub rhs: Expr,
}

impl VarAssign {
    /// Creates a variable assignment.
    pub fn new(lhs: Expr, rhs: Expr) -> Self {
        Self { lhs, rhs }
    }
}

/// `if test then ... [else ...] end if;`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IfStmt {
    test: Expr,
    then_part: StmtContainer,
    else_part: StmtContainer,
}

impl IfStmt {
    /// Creates an `if` with empty branches. The test is cast to `Boolean`.
    pub fn new(test: Expr) -> SyntaxResult<Self> {
        Ok(Self {
            test: test.cast(&Type::boolean())?,
            then_part: StmtContainer::new(),
            else_part: StmtContainer::new(),
        })
    }

    /// Returns the (boolean) test.
    pub fn test(&self) -> &Expr {
        &self.test
    }

    /// The statements run when the test holds.
    pub fn then_part(&self) -> &StmtContainer {
        &self.then_part
    }

    /// Mutable access to the `then` branch.
    pub fn then_part_mut(&mut self) -> &mut StmtContainer {
        &mut self.then_part
    }

    /// The statements run otherwise.
    pub fn else_part(&self) -> &StmtContainer {
        &self.else_part
    }

    /// Mutable access to the `else` branch.
    pub fn else_part_mut(&mut self) -> &mut StmtContainer {
        &mut self.else_part
    }
}

impl Emit for IfStmt {
    fn emit<W: fmt::Write>(&self, out: &mut Emitter<'_, W>, level: usize) -> fmt::Result {
        out.write_str("if ")?;
        self.test.emit(out, level)?;
        out.write_str(" then")?;
        self.then_part.emit(out, level)?;
        if !self.else_part.is_empty() {
            out.write_str("else")?;
            self.else_part.emit(out, level)?;
        }
        out.write_str("end if;")
    }
}

/// One `when` arm of a [`CaseStmt`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseBranch {
    when: Expr,
    stmts: StmtContainer,
}

impl CaseBranch {
    /// Creates an arm matching `when`.
    pub fn new(when: Expr) -> Self {
        Self {
            when,
            stmts: StmtContainer::new(),
        }
    }

    /// The arm's statements.
    pub fn stmts(&self) -> &StmtContainer {
        &self.stmts
    }

    /// Mutable access to the arm's statements.
    pub fn stmts_mut(&mut self) -> &mut StmtContainer {
        &mut self.stmts
    }
}

impl Emit for CaseBranch {
    fn emit<W: fmt::Write>(&self, out: &mut Emitter<'_, W>, level: usize) -> fmt::Result {
        out.write_str("when ")?;
        self.when.emit(out, level)?;
        out.write_str(" =>")?;
        let inner = out.indent(level);
        for stmt in self.stmts.stmts() {
            out.newline(inner)?;
            stmt.emit(out, inner)?;
        }
        Ok(())
    }
}

/// `case test is when ... end case;`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseStmt {
    test: Expr,
    branches: Vec<CaseBranch>,
}

impl CaseStmt {
    /// Creates a `case` with no arms.
    pub fn new(test: Expr) -> Self {
        Self {
            test,
            branches: Vec::new(),
        }
    }

    /// Appends an arm. Arms are printed in insertion order.
    pub fn add_branch(&mut self, branch: CaseBranch) {
        self.branches.push(branch);
    }
}

impl Emit for CaseStmt {
    fn emit<W: fmt::Write>(&self, out: &mut Emitter<'_, W>, level: usize) -> fmt::Result {
        out.write_str("case ")?;
        self.test.emit(out, level)?;
        out.write_str(" is")?;
        let inner = out.indent(level);
        for branch in &self.branches {
            out.newline(inner)?;
            branch.emit(out, inner)?;
        }
        out.newline(level)?;
        out.write_str("end case;")
    }
}

/// `while test loop ... end loop;`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhileStmt {
    test: Expr,
    stmts: StmtContainer,
}

impl WhileStmt {
    /// Creates a loop with an empty body. The test is cast to `Boolean`.
    pub fn new(test: Expr) -> SyntaxResult<Self> {
        Ok(Self {
            test: test.cast(&Type::boolean())?,
            stmts: StmtContainer::new(),
        })
    }

    /// The loop body.
    pub fn stmts(&self) -> &StmtContainer {
        &self.stmts
    }

    /// Mutable access to the loop body.
    pub fn stmts_mut(&mut self) -> &mut StmtContainer {
        &mut self.stmts
    }
}

impl Emit for WhileStmt {
    fn emit<W: fmt::Write>(&self, out: &mut Emitter<'_, W>, level: usize) -> fmt::Result {
        out.write_str("while ")?;
        self.test.emit(out, level)?;
        out.write_str(" loop")?;
        self.stmts.emit(out, level)?;
        out.write_str("end loop;")
    }
}

/// The flavor of a `wait` statement, before its duration is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WaitKind {
    /// Suspend forever.
    Indefinite,
    /// Suspend for a duration.
    For,
}

/// A `wait` statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WaitStmt {
    /// `wait;`
    Indefinite,
    /// `wait for <expr>;`
    For(Expr),
}

impl WaitStmt {
    /// Builds a wait from a kind and an optional duration. A duration
    /// given to an indefinite wait is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::WaitWithoutDuration`] for a timed wait
    /// without a duration.
    pub fn new(kind: WaitKind, duration: Option<Expr>) -> SyntaxResult<Self> {
        match (kind, duration) {
            (WaitKind::Indefinite, _) => Ok(WaitStmt::Indefinite),
            (WaitKind::For, Some(d)) => Ok(WaitStmt::For(d)),
            (WaitKind::For, None) => Err(SyntaxError::WaitWithoutDuration),
        }
    }
}

impl Emit for WaitStmt {
    fn emit<W: fmt::Write>(&self, out: &mut Emitter<'_, W>, level: usize) -> fmt::Result {
        out.write_str("wait")?;
        if let WaitStmt::For(d) = self {
            out.write_str(" for ")?;
            d.emit(out, level)?;
        }
        out.write_char(';')
    }
}

/// A procedure call statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcedureCall {
    /// The procedure name.
    pub name: String,
    /// The arguments; none prints the bare name.
    pub args: Vec<Expr>,
}

impl ProcedureCall {
    /// Creates a call without arguments.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Appends an argument.
    pub fn add_arg(&mut self, arg: Expr) {
        self.args.push(arg);
    }
}

/// A sequential statement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SeqStmt {
    /// `lhs <= rhs [after d];`
    SignalAssign(SignalAssign),
    /// `lhs := rhs;`
    VarAssign(VarAssign),
    /// `if`
    If(IfStmt),
    /// `case`
    Case(CaseStmt),
    /// `while`
    While(WhileStmt),
    /// `wait`
    Wait(WaitStmt),
    /// `name(args);`
    ProcedureCall(ProcedureCall),
    /// `null;`
    Null,
    /// `assert false report "<reason>" severity failure;`
    Assert {
        /// The reported message.
        reason: String,
    },
}

impl Emit for SeqStmt {
    fn emit<W: fmt::Write>(&self, out: &mut Emitter<'_, W>, level: usize) -> fmt::Result {
        match self {
            SeqStmt::SignalAssign(s) => {
                s.lhs.emit(out, level)?;
                out.write_str(" <= ")?;
                s.rhs.emit(out, level)?;
                if let Some(after) = &s.after {
                    out.write_str(" after ")?;
                    after.emit(out, level)?;
                }
                out.write_char(';')
            }
            SeqStmt::VarAssign(s) => {
                s.lhs.emit(out, level)?;
                out.write_str(" := ")?;
                s.rhs.emit(out, level)?;
                out.write_char(';')
            }
            SeqStmt::If(s) => s.emit(out, level),
            SeqStmt::Case(s) => s.emit(out, level),
            SeqStmt::While(s) => s.emit(out, level),
            SeqStmt::Wait(s) => s.emit(out, level),
            SeqStmt::ProcedureCall(c) => {
                out.write_str(&c.name)?;
                if !c.args.is_empty() {
                    out.write_char('(')?;
                    out.comma_list(&c.args, level)?;
                    out.write_char(')')?;
                }
                out.write_char(';')
            }
            SeqStmt::Null => out.write_str("null;"),
            SeqStmt::Assert { reason } => {
                out.write_str("assert false report ")?;
                out.quoted(reason)?;
                out.write_str(" severity failure;")
            }
        }
    }
}

/// A concurrent signal assignment, optionally conditional:
/// `lhs <= v1 when c1 else v2 when c2 else rhs;`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConcAssign {
    lhs: Expr,
    rhs: Expr,
    conditions: Vec<(Expr, Expr)>,
}

impl ConcAssign {
    /// Creates an unconditional assignment of `rhs` to `lhs`.
    pub fn new(lhs: Expr, rhs: Expr) -> Self {
        Self {
            lhs,
            rhs,
            conditions: Vec::new(),
        }
    }

    /// Adds a `value when cond` alternative, tried before the default
    /// and after every previously added alternative. The condition is cast
    /// to `Boolean`.
    pub fn add_condition(&mut self, value: Expr, cond: Expr) -> SyntaxResult<()> {
        let cond = cond.cast(&Type::boolean())?;
        self.conditions.push((value, cond));
        Ok(())
    }
}

impl Emit for ConcAssign {
    fn emit<W: fmt::Write>(&self, out: &mut Emitter<'_, W>, level: usize) -> fmt::Result {
        self.lhs.emit(out, level)?;
        out.write_str(" <= ")?;
        for (value, cond) in &self.conditions {
            value.emit(out, level)?;
            out.write_str(" when ")?;
            cond.emit(out, level)?;
            out.write_str(" else ")?;
        }
        self.rhs.emit(out, level)?;
        out.write_char(';')
    }
}

/// A concurrent statement inside an architecture body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ConcStmt {
    /// A process.
    Process(Process),
    /// A concurrent signal assignment.
    Assign(ConcAssign),
    /// A component instantiation.
    Instance(ComponentInst),
}

impl Emit for ConcStmt {
    fn emit<W: fmt::Write>(&self, out: &mut Emitter<'_, W>, level: usize) -> fmt::Result {
        match self {
            ConcStmt::Process(p) => p.emit(out, level),
            ConcStmt::Assign(a) => a.emit(out, level),
            ConcStmt::Instance(i) => i.emit(out, level),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emit::to_vhdl;
    use crate::expr::{BinaryOp, TimeUnit};
    use vhdlgen_common::{Logic, LogicVec};
    use vhdlgen_config::EmitConfig;

    fn render<T: Emit>(node: &T) -> String {
        to_vhdl(node, &EmitConfig::default())
    }

    fn bit(name: &str) -> Expr {
        Expr::var_ref(name, Type::std_logic())
    }

    fn assign(lhs: &str, rhs: Expr) -> SeqStmt {
        SeqStmt::SignalAssign(SignalAssign::new(bit(lhs), rhs))
    }

    #[test]
    fn signal_assign_with_delay() {
        let mut s = SignalAssign::new(bit("q"), bit("d"));
        s.set_after(Expr::time(5, TimeUnit::Ns));
        assert_eq!(render(&SeqStmt::SignalAssign(s)), "q <= d after 5 ns;");
    }

    #[test]
    fn var_assign() {
        let s = SeqStmt::VarAssign(VarAssign::new(
            Expr::var_ref("n", Type::integer()),
            Expr::int(0),
        ));
        assert_eq!(render(&s), "n := 0;");
    }

    #[test]
    fn if_casts_test_and_omits_empty_else() {
        let mut s = IfStmt::new(bit("en")).unwrap();
        assert_eq!(*s.test().ty(), Type::boolean());
        s.then_part_mut().add_stmt(assign("q", bit("d")));
        assert_eq!(render(&s), "if (en = '1') then\n  q <= d;\nend if;");
    }

    #[test]
    fn if_with_else() {
        let test = Expr::binary(bit("a"), BinaryOp::Eq, bit("b"), Type::boolean());
        let mut s = IfStmt::new(test).unwrap();
        s.then_part_mut().add_stmt(assign("q", Expr::bit(Logic::One)));
        s.else_part_mut().add_stmt(assign("q", Expr::bit(Logic::Zero)));
        assert_eq!(
            render(&SeqStmt::If(s)),
            "if (a = b) then\n  q <= '1';\nelse\n  q <= '0';\nend if;"
        );
    }

    #[test]
    fn nested_if_indents() {
        let mut inner = IfStmt::new(bit("b")).unwrap();
        inner.then_part_mut().add_stmt(SeqStmt::Null);
        let mut outer = IfStmt::new(bit("a")).unwrap();
        outer.then_part_mut().add_stmt(SeqStmt::If(inner));
        assert_eq!(
            render(&outer),
            "if (a = '1') then\n  if (b = '1') then\n    null;\n  end if;\nend if;"
        );
    }

    #[test]
    fn case_preserves_branch_order() {
        let sel = Expr::var_ref("sel", Type::unsigned(2));
        let mut s = CaseStmt::new(sel);
        for (pattern, value) in [("00", Logic::Zero), ("01", Logic::One)] {
            let bits = LogicVec::from_binary_str(pattern).unwrap();
            let mut branch = CaseBranch::new(Expr::bits(bits, false));
            branch.stmts_mut().add_stmt(assign("y", Expr::bit(value)));
            s.add_branch(branch);
        }
        let mut others = CaseBranch::new(Expr::var_ref("others", Type::unsigned(2)));
        others.stmts_mut().add_stmt(SeqStmt::Null);
        s.add_branch(others);
        assert_eq!(
            render(&s),
            "case sel is\n  when \"00\" =>\n    y <= '0';\n  when \"01\" =>\n    y <= '1';\n  when others =>\n    null;\nend case;"
        );
    }

    #[test]
    fn branch_bodies_readable_after_building() {
        let mut s = IfStmt::new(bit("a")).unwrap();
        s.then_part_mut().add_stmt(SeqStmt::Null);
        assert_eq!(s.then_part().stmts().len(), 1);
        assert!(s.else_part().is_empty());

        let mut w = WhileStmt::new(bit("b")).unwrap();
        assert!(w.stmts().is_empty());
        w.stmts_mut().add_stmt(SeqStmt::Null);
        assert_eq!(w.stmts().stmts().len(), 1);

        let mut arm = CaseBranch::new(Expr::int(0));
        arm.stmts_mut().add_stmt(SeqStmt::Null);
        assert!(!arm.stmts().is_empty());
    }

    #[test]
    fn while_loop() {
        let mut s = WhileStmt::new(bit("busy")).unwrap();
        s.stmts_mut()
            .add_stmt(SeqStmt::Wait(WaitStmt::For(Expr::time(1, TimeUnit::Us))));
        assert_eq!(
            render(&s),
            "while (busy = '1') loop\n  wait for 1 us;\nend loop;"
        );
    }

    #[test]
    fn wait_forms() {
        assert_eq!(render(&WaitStmt::Indefinite), "wait;");
        let w = WaitStmt::new(WaitKind::For, Some(Expr::time(10, TimeUnit::Ns))).unwrap();
        assert_eq!(render(&w), "wait for 10 ns;");
        assert_eq!(
            WaitStmt::new(WaitKind::Indefinite, None).unwrap(),
            WaitStmt::Indefinite
        );
    }

    #[test]
    fn timed_wait_requires_duration() {
        assert_eq!(
            WaitStmt::new(WaitKind::For, None).unwrap_err(),
            SyntaxError::WaitWithoutDuration
        );
    }

    #[test]
    fn procedure_calls() {
        let mut c = ProcedureCall::new("write");
        c.add_arg(Expr::var_ref("l", Type::string()));
        c.add_arg(Expr::string("x"));
        assert_eq!(
            render(&SeqStmt::ProcedureCall(c)),
            "write(l, String'(\"x\"));"
        );
        assert_eq!(
            render(&SeqStmt::ProcedureCall(ProcedureCall::new("flush"))),
            "flush;"
        );
    }

    #[test]
    fn null_and_assert() {
        assert_eq!(render(&SeqStmt::Null), "null;");
        let a = SeqStmt::Assert {
            reason: "done".to_string(),
        };
        assert_eq!(render(&a), "assert false report \"done\" severity failure;");
    }

    #[test]
    fn assert_reason_doubles_quotes() {
        let a = SeqStmt::Assert {
            reason: "bad \"x\"".to_string(),
        };
        assert_eq!(
            render(&a),
            "assert false report \"bad \"\"x\"\"\" severity failure;"
        );
    }

    #[test]
    fn empty_container_renders_line_break_only() {
        assert_eq!(render(&StmtContainer::new()), "\n");
    }

    #[test]
    fn concurrent_assign() {
        let a = ConcAssign::new(bit("y"), bit("a"));
        assert_eq!(render(&ConcStmt::Assign(a)), "y <= a;");
    }

    #[test]
    fn conditional_concurrent_assign() {
        let mut a = ConcAssign::new(bit("y"), Expr::bit(Logic::Z));
        a.add_condition(bit("a"), bit("en")).unwrap();
        a.add_condition(bit("b"), bit("alt")).unwrap();
        assert_eq!(
            render(&a),
            "y <= a when (en = '1') else b when (alt = '1') else 'Z';"
        );
    }
}
