//! Grammatical context flags.
//!
//! A `Context` is copied into every production. Nested constructs derive
//! their own value from the parent by flipping only the bits they change, so
//! returning from a production restores the parent's context for free.

use bitflags::bitflags;

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Context: u32 {
        /// Strict mode code.
        const STRICT = 1 << 0;
        /// Module goal; `await` is always reserved.
        const MODULE = 1 << 1;
        /// `await` parses as `AwaitExpression`.
        const IN_ASYNC = 1 << 2;
        /// `yield` parses as `YieldExpression`.
        const IN_GENERATOR = 1 << 3;
        /// Inside a formal parameter list.
        const IN_PARAMETERS = 1 << 4;
        /// `return` is allowed.
        const IN_FUNCTION_BODY = 1 << 5;
        /// Unlabelled `break` and `continue` are allowed.
        const IN_ITERATION = 1 << 6;
        /// Unlabelled `break` is allowed.
        const IN_SWITCH = 1 << 7;
        /// The `in` operator is allowed (cleared in `for` heads).
        const ALLOW_IN = 1 << 8;
        /// Inside a class body or heritage.
        const IN_CLASS = 1 << 9;
        const ALLOW_SUPER_PROPERTY = 1 << 10;
        const ALLOW_SUPER_CALL = 1 << 11;
        const ALLOW_NEW_TARGET = 1 << 12;
        /// Module top level with top-level `await` enabled.
        const TOP_LEVEL_AWAIT = 1 << 13;
        /// Class field initializer or static block: `arguments` is forbidden.
        const IN_CLASS_FIELD = 1 << 14;
        /// Class static block: `await` is reserved and `return` is not allowed.
        const IN_STATIC_BLOCK = 1 << 15;
    }
}

impl Context {
    /// Set or clear `flag`.
    #[inline]
    #[must_use]
    pub fn and(self, flag: Context, value: bool) -> Self {
        if value { self | flag } else { self - flag }
    }

    #[inline]
    #[must_use]
    pub fn and_in(self, value: bool) -> Self {
        self.and(Self::ALLOW_IN, value)
    }

    #[inline]
    #[must_use]
    pub fn is_strict(self) -> bool {
        self.contains(Self::STRICT)
    }

    #[inline]
    #[must_use]
    pub fn is_module(self) -> bool {
        self.contains(Self::MODULE)
    }

    #[inline]
    #[must_use]
    pub fn has_in(self) -> bool {
        self.contains(Self::ALLOW_IN)
    }

    /// `await` starts an `AwaitExpression`.
    #[inline]
    #[must_use]
    pub fn await_is_keyword(self) -> bool {
        self.intersects(Self::IN_ASYNC | Self::TOP_LEVEL_AWAIT)
    }

    /// `await` may not be used as an identifier.
    #[inline]
    #[must_use]
    pub fn await_is_reserved(self) -> bool {
        self.intersects(Self::IN_ASYNC | Self::MODULE | Self::TOP_LEVEL_AWAIT | Self::IN_STATIC_BLOCK)
    }

    /// `yield` starts a `YieldExpression`.
    #[inline]
    #[must_use]
    pub fn yield_is_keyword(self) -> bool {
        self.contains(Self::IN_GENERATOR)
    }

    /// `yield` may not be used as an identifier.
    #[inline]
    #[must_use]
    pub fn yield_is_reserved(self) -> bool {
        self.intersects(Self::IN_GENERATOR | Self::STRICT)
    }

    /// Context for the parameters and body of a non-arrow function.
    ///
    /// Keeps only the goal and strictness of `self`; loop, switch, class field
    /// and super permissions never cross a function boundary.
    #[must_use]
    pub fn for_function(self, is_async: bool, is_generator: bool) -> Self {
        let inherited = self & (Self::STRICT | Self::MODULE | Self::IN_CLASS);
        (inherited | Self::IN_FUNCTION_BODY | Self::ALLOW_NEW_TARGET | Self::ALLOW_IN)
            .and(Self::IN_ASYNC, is_async)
            .and(Self::IN_GENERATOR, is_generator)
    }

    /// Context for the parameters and body of an arrow function.
    ///
    /// Arrows keep `new.target`, `super` and class-field restrictions of the
    /// enclosing code.
    #[must_use]
    pub fn for_arrow(self, is_async: bool) -> Self {
        let inherited = self
            & (Self::STRICT
                | Self::MODULE
                | Self::IN_CLASS
                | Self::ALLOW_SUPER_PROPERTY
                | Self::ALLOW_SUPER_CALL
                | Self::ALLOW_NEW_TARGET
                | Self::IN_CLASS_FIELD
                | Self::IN_STATIC_BLOCK);
        (inherited | Self::IN_FUNCTION_BODY).and(Self::IN_ASYNC, is_async)
    }
}
