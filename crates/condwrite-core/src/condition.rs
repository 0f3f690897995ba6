//! Condition tree model and builder.
//!
//! A condition is an ordered list of nodes where every node after the first is
//! attached to its predecessor by a [`Joiner`]. [`ConditionList`] stores the
//! head separately from the joined tail, so a leading joiner cannot be
//! represented at all.

use std::fmt;

use condwrite_model::AttributeValue;

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// Equal (`=`).
    Eq,
    /// Not equal (`<>`).
    Ne,
    /// Less than (`<`).
    Lt,
    /// Less than or equal (`<=`).
    Le,
    /// Greater than (`>`).
    Gt,
    /// Greater than or equal (`>=`).
    Ge,
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Eq => write!(f, "="),
            Self::Ne => write!(f, "<>"),
            Self::Lt => write!(f, "<"),
            Self::Le => write!(f, "<="),
            Self::Gt => write!(f, ">"),
            Self::Ge => write!(f, ">="),
        }
    }
}

/// Connective between a node and its predecessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Joiner {
    /// Logical AND.
    And,
    /// Logical OR.
    Or,
}

impl fmt::Display for Joiner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::And => write!(f, "AND"),
            Self::Or => write!(f, "OR"),
        }
    }
}

/// Type descriptors accepted by `attribute_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeType {
    /// `S`
    String,
    /// `SS`
    StringSet,
    /// `N`
    Number,
    /// `NS`
    NumberSet,
    /// `B`
    Binary,
    /// `BS`
    BinarySet,
    /// `BOOL`
    Boolean,
    /// `NULL`
    Null,
    /// `L`
    List,
    /// `M`
    Map,
}

impl AttributeType {
    /// The descriptor string bound as the function's second argument.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "S",
            Self::StringSet => "SS",
            Self::Number => "N",
            Self::NumberSet => "NS",
            Self::Binary => "B",
            Self::BinarySet => "BS",
            Self::Boolean => "BOOL",
            Self::Null => "NULL",
            Self::List => "L",
            Self::Map => "M",
        }
    }
}

/// Predicate functions. Binary functions carry their second argument.
#[derive(Debug, Clone, PartialEq)]
pub enum ConditionFunction {
    /// `attribute_exists(path)`
    AttributeExists,
    /// `attribute_not_exists(path)`
    AttributeNotExists,
    /// `begins_with(path, prefix)`
    BeginsWith(AttributeValue),
    /// `contains(path, operand)`
    Contains(AttributeValue),
    /// `attribute_type(path, type)`
    AttributeType(AttributeType),
}

impl ConditionFunction {
    /// `begins_with` with the given prefix.
    #[must_use]
    pub fn begins_with(prefix: impl Into<AttributeValue>) -> Self {
        Self::BeginsWith(prefix.into())
    }

    /// `contains` with the given operand.
    #[must_use]
    pub fn contains(operand: impl Into<AttributeValue>) -> Self {
        Self::Contains(operand.into())
    }

    /// The function name as written in an expression.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::AttributeExists => "attribute_exists",
            Self::AttributeNotExists => "attribute_not_exists",
            Self::BeginsWith(_) => "begins_with",
            Self::Contains(_) => "contains",
            Self::AttributeType(_) => "attribute_type",
        }
    }

    /// The second argument, for binary functions.
    #[must_use]
    pub fn into_argument(self) -> Option<AttributeValue> {
        match self {
            Self::AttributeExists | Self::AttributeNotExists => None,
            Self::BeginsWith(value) | Self::Contains(value) => Some(value),
            Self::AttributeType(ty) => Some(AttributeValue::from(ty.as_str())),
        }
    }
}

/// One node of a condition tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// `attribute op value`.
    Comparison {
        /// Attribute name.
        attribute: String,
        /// Relational operator.
        op: CompareOp,
        /// Value compared against.
        value: AttributeValue,
        /// Render with a `NOT ` prefix.
        negated: bool,
    },
    /// `function (attribute[, argument])`.
    Function {
        /// Attribute name.
        attribute: String,
        /// Predicate function.
        function: ConditionFunction,
        /// Render with a `NOT ` prefix.
        negated: bool,
    },
    /// `attribute IN (candidates...)`.
    Membership {
        /// Attribute name.
        attribute: String,
        /// Candidate values, in call order.
        values: Vec<AttributeValue>,
        /// Render with a `NOT ` prefix.
        negated: bool,
    },
    /// A parenthesised nested list. Negation applies only to its leaves.
    Group(ConditionList),
}

/// An ordered list of condition nodes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConditionList {
    head: Option<Box<Condition>>,
    tail: Vec<(Joiner, Condition)>,
}

impl ConditionList {
    /// Append a node. The joiner is dropped when the list is empty.
    pub fn push(&mut self, joiner: Joiner, condition: Condition) {
        if self.head.is_none() {
            self.head = Some(Box::new(condition));
        } else {
            self.tail.push((joiner, condition));
        }
    }

    /// Returns `true` if the list has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Number of nodes at this level.
    #[must_use]
    pub fn len(&self) -> usize {
        usize::from(self.head.is_some()) + self.tail.len()
    }

    /// Nodes in order, each with the joiner attaching it to its predecessor.
    pub fn iter(&self) -> impl Iterator<Item = (Option<Joiner>, &Condition)> {
        self.head
            .iter()
            .map(|c| (None, c.as_ref()))
            .chain(self.tail.iter().map(|(j, c)| (Some(*j), c)))
    }
}

impl IntoIterator for ConditionList {
    type Item = (Option<Joiner>, Condition);
    type IntoIter = std::iter::Chain<
        std::option::IntoIter<(Option<Joiner>, Condition)>,
        std::iter::Map<
            std::vec::IntoIter<(Joiner, Condition)>,
            fn((Joiner, Condition)) -> (Option<Joiner>, Condition),
        >,
    >;

    fn into_iter(self) -> Self::IntoIter {
        let joined: fn((Joiner, Condition)) -> (Option<Joiner>, Condition) =
            |(j, c)| (Some(j), c);
        self.head
            .map(|c| (None, *c))
            .into_iter()
            .chain(self.tail.into_iter().map(joined))
    }
}

/// Accumulates a [`ConditionList`].
///
/// The `when*` forms start a list; `and*`/`or*` attach a node with the named
/// joiner, which is dropped if the list is still empty. Every leaf call takes
/// an explicit `negate` flag.
#[derive(Debug, Default)]
pub struct ConditionBuilder {
    conditions: ConditionList,
}

impl ConditionBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a comparison. On a non-empty list this behaves like [`Self::and`].
    pub fn when(
        &mut self,
        attribute: impl Into<String>,
        op: CompareOp,
        value: impl Into<AttributeValue>,
        negate: bool,
    ) -> &mut Self {
        self.comparison(Joiner::And, attribute.into(), op, value.into(), negate)
    }

    /// Attach a comparison with `AND`.
    pub fn and(
        &mut self,
        attribute: impl Into<String>,
        op: CompareOp,
        value: impl Into<AttributeValue>,
        negate: bool,
    ) -> &mut Self {
        self.comparison(Joiner::And, attribute.into(), op, value.into(), negate)
    }

    /// Attach a comparison with `OR`.
    pub fn or(
        &mut self,
        attribute: impl Into<String>,
        op: CompareOp,
        value: impl Into<AttributeValue>,
        negate: bool,
    ) -> &mut Self {
        self.comparison(Joiner::Or, attribute.into(), op, value.into(), negate)
    }

    /// Start with a function predicate.
    pub fn when_fn(
        &mut self,
        function: ConditionFunction,
        attribute: impl Into<String>,
        negate: bool,
    ) -> &mut Self {
        self.function(Joiner::And, function, attribute.into(), negate)
    }

    /// Attach a function predicate with `AND`.
    pub fn and_fn(
        &mut self,
        function: ConditionFunction,
        attribute: impl Into<String>,
        negate: bool,
    ) -> &mut Self {
        self.function(Joiner::And, function, attribute.into(), negate)
    }

    /// Attach a function predicate with `OR`.
    pub fn or_fn(
        &mut self,
        function: ConditionFunction,
        attribute: impl Into<String>,
        negate: bool,
    ) -> &mut Self {
        self.function(Joiner::Or, function, attribute.into(), negate)
    }

    /// Start with a membership test. A single candidate is passed as `[value]`.
    pub fn when_in<I, V>(
        &mut self,
        attribute: impl Into<String>,
        values: I,
        negate: bool,
    ) -> &mut Self
    where
        I: IntoIterator<Item = V>,
        V: Into<AttributeValue>,
    {
        self.membership(Joiner::And, attribute.into(), values, negate)
    }

    /// Attach a membership test with `AND`.
    pub fn and_in<I, V>(
        &mut self,
        attribute: impl Into<String>,
        values: I,
        negate: bool,
    ) -> &mut Self
    where
        I: IntoIterator<Item = V>,
        V: Into<AttributeValue>,
    {
        self.membership(Joiner::And, attribute.into(), values, negate)
    }

    /// Attach a membership test with `OR`.
    pub fn or_in<I, V>(
        &mut self,
        attribute: impl Into<String>,
        values: I,
        negate: bool,
    ) -> &mut Self
    where
        I: IntoIterator<Item = V>,
        V: Into<AttributeValue>,
    {
        self.membership(Joiner::Or, attribute.into(), values, negate)
    }

    /// Start with a group populated by `build`.
    pub fn when_group(&mut self, build: impl FnOnce(&mut ConditionBuilder)) -> &mut Self {
        self.group(Joiner::And, build)
    }

    /// Attach a group with `AND`.
    pub fn and_group(&mut self, build: impl FnOnce(&mut ConditionBuilder)) -> &mut Self {
        self.group(Joiner::And, build)
    }

    /// Attach a group with `OR`.
    pub fn or_group(&mut self, build: impl FnOnce(&mut ConditionBuilder)) -> &mut Self {
        self.group(Joiner::Or, build)
    }

    /// Returns `true` if no condition has been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// The conditions accumulated so far.
    #[must_use]
    pub fn conditions(&self) -> &ConditionList {
        &self.conditions
    }

    /// Finish the list.
    #[must_use]
    pub fn build(self) -> ConditionList {
        self.conditions
    }

    fn comparison(
        &mut self,
        joiner: Joiner,
        attribute: String,
        op: CompareOp,
        value: AttributeValue,
        negated: bool,
    ) -> &mut Self {
        self.conditions.push(
            joiner,
            Condition::Comparison {
                attribute,
                op,
                value,
                negated,
            },
        );
        self
    }

    fn function(
        &mut self,
        joiner: Joiner,
        function: ConditionFunction,
        attribute: String,
        negated: bool,
    ) -> &mut Self {
        self.conditions.push(
            joiner,
            Condition::Function {
                attribute,
                function,
                negated,
            },
        );
        self
    }

    fn membership<I, V>(
        &mut self,
        joiner: Joiner,
        attribute: String,
        values: I,
        negated: bool,
    ) -> &mut Self
    where
        I: IntoIterator<Item = V>,
        V: Into<AttributeValue>,
    {
        let values = values.into_iter().map(Into::into).collect();
        self.conditions.push(
            joiner,
            Condition::Membership {
                attribute,
                values,
                negated,
            },
        );
        self
    }

    fn group(&mut self, joiner: Joiner, build: impl FnOnce(&mut ConditionBuilder)) -> &mut Self {
        let mut nested = ConditionBuilder::new();
        build(&mut nested);
        self.conditions.push(joiner, Condition::Group(nested.build()));
        self
    }
}
