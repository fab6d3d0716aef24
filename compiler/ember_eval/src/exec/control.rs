//! Control signals: how statements complete.
//!
//! Every statement evaluates to a `ControlAction`. `Normal` carries the
//! statement's value; the other variants are non-local exits that travel
//! outward unchanged until a construct claims them:
//! - loops claim unlabeled `break`/`continue` and those naming one of the
//!   loop's labels (`to_loop_action`)
//! - a labeled non-loop statement claims `break` with its label
//! - a `switch` claims unlabeled `break`
//! - a function call claims `Return`

use smallvec::SmallVec;

use ember_ir::Name;

use crate::value::Value;

/// Labels attached to a statement. `a: b: while (…)` gives the loop both.
pub type LabelSet = SmallVec<[Name; 2]>;

/// Completion of a statement.
#[derive(Clone, Debug, PartialEq)]
pub enum ControlAction {
    Normal(Value),
    Break(Option<Name>),
    Continue(Option<Name>),
    Return(Value),
}

impl ControlAction {
    #[inline]
    pub fn normal() -> Self {
        ControlAction::Normal(Value::Undefined)
    }

    #[inline]
    pub fn is_normal(&self) -> bool {
        matches!(self, ControlAction::Normal(_))
    }

    /// Value the action produces when it ends a program or function body.
    /// `Break`/`Continue` escaping to that level produce `undefined`.
    pub fn into_value(self) -> Value {
        match self {
            ControlAction::Normal(value) | ControlAction::Return(value) => value,
            ControlAction::Break(_) | ControlAction::Continue(_) => Value::Undefined,
        }
    }
}

/// What a loop does after one iteration of its body.
#[derive(Clone, Debug, PartialEq)]
pub enum LoopAction {
    /// Run the update (for `for`) and test again.
    Next,
    /// Leave the loop normally.
    Exit,
    /// Leave the loop and hand this action to the enclosing construct.
    Propagate(ControlAction),
}

/// Classify a loop body's completion against the loop's own labels.
pub fn to_loop_action(action: ControlAction, labels: &[Name]) -> LoopAction {
    let targets_this_loop = |label: Option<Name>| label.map_or(true, |l| labels.contains(&l));
    match action {
        ControlAction::Normal(_) => LoopAction::Next,
        ControlAction::Continue(label) if targets_this_loop(label) => LoopAction::Next,
        ControlAction::Break(label) if targets_this_loop(label) => LoopAction::Exit,
        other => LoopAction::Propagate(other),
    }
}

/// Completion of a labeled non-loop statement: a `break` naming `label`
/// stops here, anything else passes through.
pub fn absorb_labeled_break(action: ControlAction, label: Name) -> ControlAction {
    match action {
        ControlAction::Break(Some(target)) if target == label => ControlAction::normal(),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_ir::StringInterner;
    use pretty_assertions::assert_eq;

    #[test]
    fn unlabeled_signals_target_the_innermost_loop() {
        assert_eq!(to_loop_action(ControlAction::Break(None), &[]), LoopAction::Exit);
        assert_eq!(to_loop_action(ControlAction::Continue(None), &[]), LoopAction::Next);
        assert_eq!(to_loop_action(ControlAction::normal(), &[]), LoopAction::Next);
    }

    #[test]
    fn labeled_signals_match_any_loop_label() {
        let interner = StringInterner::new();
        let outer = interner.intern("outer");
        let alias = interner.intern("alias");
        let labels = [alias, outer];
        assert_eq!(
            to_loop_action(ControlAction::Break(Some(outer)), &labels),
            LoopAction::Exit
        );
        assert_eq!(
            to_loop_action(ControlAction::Continue(Some(alias)), &labels),
            LoopAction::Next
        );
    }

    #[test]
    fn foreign_labels_and_return_propagate() {
        let interner = StringInterner::new();
        let outer = interner.intern("outer");
        let inner = interner.intern("inner");
        assert_eq!(
            to_loop_action(ControlAction::Break(Some(outer)), &[inner]),
            LoopAction::Propagate(ControlAction::Break(Some(outer)))
        );
        assert_eq!(
            to_loop_action(ControlAction::Continue(Some(outer)), &[]),
            LoopAction::Propagate(ControlAction::Continue(Some(outer)))
        );
        assert_eq!(
            to_loop_action(ControlAction::Return(Value::Number(1.0)), &[]),
            LoopAction::Propagate(ControlAction::Return(Value::Number(1.0)))
        );
    }

    #[test]
    fn labeled_block_absorbs_only_its_break() {
        let interner = StringInterner::new();
        let block = interner.intern("block");
        let other = interner.intern("other");
        assert_eq!(
            absorb_labeled_break(ControlAction::Break(Some(block)), block),
            ControlAction::normal()
        );
        assert_eq!(
            absorb_labeled_break(ControlAction::Break(None), block),
            ControlAction::Break(None)
        );
        assert_eq!(
            absorb_labeled_break(ControlAction::Break(Some(other)), block),
            ControlAction::Break(Some(other))
        );
    }

    #[test]
    fn escaping_signals_yield_undefined() {
        assert_eq!(ControlAction::Break(None).into_value(), Value::Undefined);
        assert_eq!(
            ControlAction::Return(Value::Bool(true)).into_value(),
            Value::Bool(true)
        );
    }
}
