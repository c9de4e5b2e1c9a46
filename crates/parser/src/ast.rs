//! # Go Subset Syntax Tree
//!
//! Arena-allocated tree for the part of Go that the front end accepts. The
//! accepted grammar is wider than what the translator can lower, so that
//! anything outside the translatable subset still reaches the translator as
//! a positioned node and can be rejected with a precise diagnostic.
//!
//! ## Architecture
//!
//! - **Nodes**: allocated in typed arenas (`SpannedArena<T>`), one span per node
//! - **Lists**: centralized buffers referenced by `ListRef<T>`
//! - **Symbols**: identifiers are interned once in an `Interner`
//! - **Walk**: `#[derive(Walk)]` generates `impl crate::walk::Walk`

use ast_derive::Walk;
use core::marker::PhantomData;
use core::ops::{Index, IndexMut};
use smallvec::SmallVec;
use std::collections::HashMap;
use std::hash::{BuildHasher, BuildHasherDefault, Hasher, RandomState};

// =============================================================================
// Core Foundation Types
// =============================================================================

/// Byte range into the source text.
///
/// Positions are stored as `u32`, limiting inputs to 4GiB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, PartialOrd, Ord)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    /// Creates a new span from usize positions.
    ///
    /// # Panics
    /// In debug builds, panics if positions exceed `u32::MAX`.
    #[inline]
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= u32::MAX as usize);
        debug_assert!(end <= u32::MAX as usize);
        Self {
            start: start as u32,
            end: end as u32,
        }
    }

    /// Smallest span covering both `self` and `other`.
    #[inline]
    pub fn to(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    #[inline]
    pub const fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Slices `src` with this span.
    #[inline]
    pub fn text<'s>(&self, src: &'s str) -> &'s str {
        &src[self.start as usize..self.end as usize]
    }
}

/// Type-safe identifier for arena-allocated nodes.
#[derive(Debug, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Id<T> {
    raw: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Copy for Id<T> {}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Id<T> {
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self {
            raw,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub const fn to_usize(&self) -> usize {
        self.raw as usize
    }
}

/// Typed reference into a centralized list buffer.
#[derive(Debug, PartialEq, Eq)]
pub struct ListRef<T> {
    start: u32,
    len: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Copy for ListRef<T> {}

impl<T> Clone for ListRef<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Default for ListRef<T> {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl<T> ListRef<T> {
    pub const EMPTY: Self = Self {
        start: 0,
        len: 0,
        _marker: PhantomData,
    };

    #[inline]
    pub const fn new(start: u32, len: u32) -> Self {
        Self {
            start,
            len,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    const fn range(&self) -> core::ops::Range<usize> {
        self.start as usize..(self.start + self.len) as usize
    }
}

// =============================================================================
// Symbol Interning
// =============================================================================

/// Interned string symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Symbol(u32);

pub type Ident = Symbol;

/// Identifier occurrence (interned symbol + source position).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentName {
    pub sym: Ident,
    pub pos: Span,
}

/// Identity hasher for u64 values (the key is already a hash).
#[derive(Default)]
struct U64IdentityHasher(u64);

impl Hasher for U64IdentityHasher {
    fn write(&mut self, _b: &[u8]) {
        unreachable!("U64IdentityHasher only supports write_u64")
    }

    #[inline]
    fn write_u64(&mut self, i: u64) {
        self.0 = i;
    }

    #[inline]
    fn finish(&self) -> u64 {
        self.0
    }
}

type U64IdentityBuild = BuildHasherDefault<U64IdentityHasher>;

/// String interner. Symbols are stored once and looked up via hash buckets.
#[derive(Debug, Default)]
pub struct Interner {
    strings: Vec<Box<str>>,
    buckets: HashMap<u64, SmallVec<[Symbol; 1]>, U64IdentityBuild>,
    state: RandomState,
}

impl Interner {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns a string and returns its symbol.
    pub fn intern(&mut self, s: &str) -> Symbol {
        let h = self.state.hash_one(s);
        let entry = self.buckets.entry(h).or_default();

        for &sym in entry.iter() {
            if self.strings[sym.0 as usize].as_ref() == s {
                return sym;
            }
        }

        let sym = Symbol(self.strings.len() as u32);
        self.strings.push(s.into());
        entry.push(sym);
        sym
    }

    /// Resolves a symbol back to its string.
    ///
    /// Symbols from another interner resolve to `""`.
    #[inline]
    pub fn resolve(&self, sym: Symbol) -> &str {
        self.strings
            .get(sym.0 as usize)
            .map(AsRef::as_ref)
            .unwrap_or_default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

// =============================================================================
// Arena Allocation
// =============================================================================

/// Arena for nodes with associated spans, stored in parallel vectors.
#[derive(Debug)]
pub struct SpannedArena<T> {
    data: Vec<T>,
    spans: Vec<Span>,
}

impl<T> Default for SpannedArena<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            spans: Vec::new(),
        }
    }
}

impl<T> SpannedArena<T> {
    #[inline]
    pub fn alloc(&mut self, node: T, span: Span) -> Id<T> {
        let id = Id::from_raw(self.data.len() as u32);
        self.data.push(node);
        self.spans.push(span);
        id
    }

    #[inline]
    pub fn get(&self, id: Id<T>) -> &T {
        &self.data[id.to_usize()]
    }

    #[inline]
    pub fn span(&self, id: Id<T>) -> Span {
        self.spans[id.to_usize()]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl<T> Index<Id<T>> for SpannedArena<T> {
    type Output = T;
    fn index(&self, id: Id<T>) -> &T {
        self.get(id)
    }
}

impl<T> IndexMut<Id<T>> for SpannedArena<T> {
    fn index_mut(&mut self, id: Id<T>) -> &mut T {
        &mut self.data[id.to_usize()]
    }
}

// =============================================================================
// Node IDs
// =============================================================================

pub type GenDeclId = Id<GenDecl>;
pub type SpecId = Id<Spec>;
pub type FuncDeclId = Id<FuncDecl>;
pub type StmtId = Id<Stmt>;
pub type ExprId = Id<Expr>;
pub type TypeId = Id<Type>;
pub type FieldId = Id<Field>;
pub type CaseClauseId = Id<CaseClause>;
pub type CommentId = Id<Comment>;
pub type CommentGroupId = Id<CommentGroup>;

// =============================================================================
// Centralized List Storage
// =============================================================================

#[derive(Debug, Default)]
pub struct ExtraData {
    pub ident_names: Vec<IdentName>,
    pub exprs: Vec<ExprId>,
    pub stmts: Vec<StmtId>,
    pub fields: Vec<FieldId>,
    pub specs: Vec<SpecId>,
    pub top_decls: Vec<TopLevelDecl>,
    pub case_clauses: Vec<CaseClauseId>,
    pub comment_ids: Vec<CommentId>,
    pub comment_group_ids: Vec<CommentGroupId>,
}

// =============================================================================
// Main AST Arena
// =============================================================================

/// Central arena holding all nodes and list buffers.
#[derive(Debug, Default)]
pub struct AstArena {
    pub gen_decls: SpannedArena<GenDecl>,
    pub specs: SpannedArena<Spec>,
    pub funcs: SpannedArena<FuncDecl>,
    pub stmts: SpannedArena<Stmt>,
    pub exprs: SpannedArena<Expr>,
    pub types: SpannedArena<Type>,
    pub fields: SpannedArena<Field>,
    pub case_clauses: SpannedArena<CaseClause>,
    pub comments: SpannedArena<Comment>,
    pub comment_groups: SpannedArena<CommentGroup>,
    pub extras: ExtraData,
}

macro_rules! list_buffers {
    ($($t:ty => $field:ident, $build:ident, $get:ident;)*) => {
        impl AstArena {
            $(
                pub fn $build(&mut self, items: impl IntoIterator<Item = $t>) -> ListRef<$t> {
                    let buf = &mut self.extras.$field;
                    let start = buf.len();
                    buf.extend(items);
                    debug_assert!(buf.len() <= u32::MAX as usize);
                    ListRef::new(start as u32, (buf.len() - start) as u32)
                }

                pub fn $get(&self, r: ListRef<$t>) -> &[$t] {
                    &self.extras.$field[r.range()]
                }
            )*
        }
    };
}

list_buffers! {
    IdentName => ident_names, list_ident_names, ident_names;
    ExprId => exprs, list_exprs, exprs_list;
    StmtId => stmts, list_stmts, stmts_list;
    FieldId => fields, list_fields, fields_list;
    SpecId => specs, list_specs, specs_list;
    TopLevelDecl => top_decls, list_top_decls, top_decls;
    CaseClauseId => case_clauses, list_case_clauses, case_clauses_list;
    CommentId => comment_ids, list_comment_ids, comment_ids;
    CommentGroupId => comment_group_ids, list_comment_group_ids, comment_group_ids;
}

impl AstArena {
    pub fn new() -> Self {
        Self::default()
    }
}

// =============================================================================
// Comments
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentKind {
    Line,
    Block,
}

/// Comment token (text is recovered from source via its span).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Comment {
    pub kind: CommentKind,
}

/// Group of adjacent comments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Walk)]
pub struct CommentGroup {
    pub comments: ListRef<CommentId>,
}

// =============================================================================
// Source File (Root Node)
// =============================================================================

/// A complete Go source file.
///
/// ```text
/// SourceFile = PackageClause ";" { ImportDecl ";" } { TopLevelDecl ";" }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Walk)]
pub struct SourceFile {
    #[walk(skip)]
    pub package_pos: Span,
    pub name: IdentName,
    /// All top-level declarations (imports included) in source order
    pub decls: ListRef<TopLevelDecl>,
    /// All comment groups in source order
    pub comments: ListRef<CommentGroupId>,
}

// =============================================================================
// Declarations
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Walk)]
pub enum TopLevelDecl {
    Gen(GenDeclId),
    Func(FuncDeclId),
}

/// `import`, `const`, `type` or `var` declaration, grouped or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Walk)]
pub struct GenDecl {
    #[walk(skip)]
    pub kind: GenDeclKind,
    pub specs: ListRef<SpecId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum GenDeclKind {
    Import,
    Const,
    Type,
    Var,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Walk)]
pub enum Spec {
    /// `ImportSpec = [ "." | PackageName ] ImportPath`
    Import {
        name: Option<IdentName>,
        #[walk(skip)]
        path: Span,
    },
    /// `ConstSpec`/`VarSpec`: `IdentifierList [ Type ] [ "=" ExpressionList ]`
    Value {
        names: ListRef<IdentName>,
        typ: Option<TypeId>,
        values: ListRef<ExprId>,
    },
    /// `TypeSpec = identifier [ "=" ] Type`
    Type {
        name: IdentName,
        #[walk(skip)]
        alias: bool,
        typ: TypeId,
    },
}

/// Function or method declaration.
///
/// ```text
/// FunctionDecl = "func" FunctionName Signature [ FunctionBody ]
/// MethodDecl   = "func" Receiver MethodName Signature [ FunctionBody ]
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Walk)]
pub struct FuncDecl {
    /// Receiver fields; `Some` only for methods
    pub recv: Option<ListRef<FieldId>>,
    pub name: IdentName,
    pub sig: Signature,
    /// `None` for declarations implemented elsewhere
    pub body: Option<Block>,
}

/// `Signature = Parameters [ Result ]`
///
/// A single unnamed result is stored as one field without names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Walk)]
pub struct Signature {
    pub params: ListRef<FieldId>,
    pub results: ListRef<FieldId>,
}

/// Parameter, result, receiver, struct field or interface method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Walk)]
pub struct Field {
    /// Empty for anonymous parameters and embedded fields
    pub names: ListRef<IdentName>,
    pub typ: TypeId,
}

// =============================================================================
// Statements
// =============================================================================

/// `Block = "{" StatementList "}"`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Walk)]
pub struct Block {
    #[walk(skip)]
    pub l_brace: Span,
    pub stmts: ListRef<StmtId>,
    #[walk(skip)]
    pub r_brace: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Walk)]
pub enum Stmt {
    Empty,
    Expr(ExprId),

    /// `lhs op rhs` for `=` and every compound assignment operator
    Assign {
        lhs: ListRef<ExprId>,
        #[walk(skip)]
        op: AssignOp,
        rhs: ListRef<ExprId>,
    },

    /// `names := values`
    ShortVarDecl {
        names: ListRef<IdentName>,
        values: ListRef<ExprId>,
    },

    IncDec {
        expr: ExprId,
        #[walk(skip)]
        op: IncDecOp,
    },

    /// `ch <- value`
    Send { chan: ExprId, value: ExprId },

    /// Local `const`/`type`/`var` declaration
    Decl(GenDeclId),

    Labeled { label: IdentName, stmt: StmtId },

    Go { call: ExprId },
    Defer { call: ExprId },

    Return { results: ListRef<ExprId> },

    Branch {
        #[walk(skip)]
        kind: BranchKind,
        label: Option<IdentName>,
    },

    Block(Block),

    If {
        init: Option<StmtId>,
        cond: ExprId,
        then_block: Block,
        /// Either `Stmt::Block` or another `Stmt::If`
        else_stmt: Option<StmtId>,
    },

    For { kind: ForKind, body: Block },

    /// Expression and type switches
    Switch {
        init: Option<StmtId>,
        tag: Option<StmtId>,
        clauses: ListRef<CaseClauseId>,
    },

    Select { clauses: ListRef<CaseClauseId> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchKind {
    Break,
    Continue,
    Goto,
    Fallthrough,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Walk)]
pub enum ForKind {
    /// `for { ... }`
    Infinite,
    /// `for cond { ... }`
    Cond(ExprId),
    /// `for init; cond; post { ... }`
    Clause {
        init: Option<StmtId>,
        cond: Option<ExprId>,
        post: Option<StmtId>,
    },
    /// `for k, v := range x { ... }`
    Range {
        key: Option<ExprId>,
        value: Option<ExprId>,
        #[walk(skip)]
        define: bool,
        expr: ExprId,
    },
}

/// `case`/`default` clause of a switch or select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Walk)]
pub struct CaseClause {
    /// Switch case values; empty for `default`
    pub exprs: ListRef<ExprId>,
    /// Select communication; `None` for `default` and in switches
    pub comm: Option<StmtId>,
    pub body: ListRef<StmtId>,
}

// =============================================================================
// Expressions
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Walk)]
pub enum Expr {
    Ident(#[walk(skip)] Ident),

    BasicLit(#[walk(skip)] BasicLit),

    /// `T{...}`, or `{...}` nested inside another composite literal
    CompositeLit {
        typ: Option<TypeId>,
        elems: ListRef<ExprId>,
    },

    /// `key: value` element inside a composite literal
    KeyValue { key: ExprId, value: ExprId },

    FuncLit { sig: Signature, body: Block },

    Paren(ExprId),

    /// `x.sel`: package member, field or method
    Selector { expr: ExprId, sel: IdentName },

    Index { expr: ExprId, index: ExprId },

    Slice {
        expr: ExprId,
        lo: Option<ExprId>,
        hi: Option<ExprId>,
        max: Option<ExprId>,
    },

    /// `x.(T)`, or `x.(type)` in a type switch guard (`typ == None`)
    TypeAssert { expr: ExprId, typ: Option<TypeId> },

    Call {
        fun: ExprId,
        args: ListRef<ExprId>,
        #[walk(skip)]
        variadic: bool,
    },

    /// `*x`
    Star(ExprId),

    Unary {
        #[walk(skip)]
        op: UnaryOp,
        expr: ExprId,
    },

    Binary {
        left: ExprId,
        #[walk(skip)]
        op: BinaryOp,
        right: ExprId,
    },

    /// A type in expression position (`[]byte(s)`, `make(map[K]V)`)
    Type(TypeId),
}

/// Basic literal; its text is the source slice of the node span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BasicLit {
    pub kind: BasicLitKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum BasicLitKind {
    Int,
    Float,
    Imag,
    Rune,
    String,
}

// =============================================================================
// Types
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Walk)]
pub enum Type {
    /// `T`
    Name(#[walk(skip)] Ident),
    /// `pkg.T`
    Qualified { pkg: IdentName, name: IdentName },
    /// `*T`
    Pointer(TypeId),
    /// `[N]T` (`len == None` for `[...]T`)
    Array { len: Option<ExprId>, elem: TypeId },
    /// `[]T`
    Slice(TypeId),
    /// `...T` in final parameter position
    Variadic(TypeId),
    Map { key: TypeId, value: TypeId },
    Chan {
        #[walk(skip)]
        dir: ChanDir,
        elem: TypeId,
    },
    Struct { fields: ListRef<FieldId> },
    Interface { methods: ListRef<FieldId> },
    Func(Signature),
    Paren(TypeId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChanDir {
    Both,
    Send,
    Recv,
}

// =============================================================================
// Operators
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Add,  // +
    Sub,  // -
    Not,  // !
    Xor,  // ^
    Addr, // &
    Recv, // <-
}

impl UnaryOp {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Not => "!",
            Self::Xor => "^",
            Self::Addr => "&",
            Self::Recv => "<-",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,    // +
    Sub,    // -
    Mul,    // *
    Div,    // /
    Mod,    // %
    And,    // &
    Or,     // |
    Xor,    // ^
    Shl,    // <<
    Shr,    // >>
    AndNot, // &^
    LAnd,   // &&
    LOr,    // ||
    Eq,     // ==
    Ne,     // !=
    Lt,     // <
    Le,     // <=
    Gt,     // >
    Ge,     // >=
}

impl BinaryOp {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::And => "&",
            Self::Or => "|",
            Self::Xor => "^",
            Self::Shl => "<<",
            Self::Shr => ">>",
            Self::AndNot => "&^",
            Self::LAnd => "&&",
            Self::LOr => "||",
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
        }
    }

    /// Go binary precedence, 1 (`||`) to 5 (`*`).
    pub const fn precedence(self) -> u8 {
        match self {
            Self::LOr => 1,
            Self::LAnd => 2,
            Self::Eq | Self::Ne | Self::Lt | Self::Le | Self::Gt | Self::Ge => 3,
            Self::Add | Self::Sub | Self::Or | Self::Xor => 4,
            Self::Mul
            | Self::Div
            | Self::Mod
            | Self::Shl
            | Self::Shr
            | Self::And
            | Self::AndNot => 5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOp {
    Assign,       // =
    AddAssign,    // +=
    SubAssign,    // -=
    MulAssign,    // *=
    DivAssign,    // /=
    ModAssign,    // %=
    AndAssign,    // &=
    OrAssign,     // |=
    XorAssign,    // ^=
    ShlAssign,    // <<=
    ShrAssign,    // >>=
    AndNotAssign, // &^=
}

impl AssignOp {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Assign => "=",
            Self::AddAssign => "+=",
            Self::SubAssign => "-=",
            Self::MulAssign => "*=",
            Self::DivAssign => "/=",
            Self::ModAssign => "%=",
            Self::AndAssign => "&=",
            Self::OrAssign => "|=",
            Self::XorAssign => "^=",
            Self::ShlAssign => "<<=",
            Self::ShrAssign => ">>=",
            Self::AndNotAssign => "&^=",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncDecOp {
    Inc, // ++
    Dec, // --
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interner_dedups() {
        let mut interner = Interner::new();
        let a = interner.intern("pinMode");
        let b = interner.intern("digitalWrite");
        assert_eq!(interner.intern("pinMode"), a);
        assert_ne!(a, b);
        assert_eq!(interner.resolve(b), "digitalWrite");
        assert_eq!(interner.len(), 2);
    }

    #[test]
    fn list_buffers_round_trip() {
        let mut arena = AstArena::new();
        let e1 = arena.exprs.alloc(Expr::Paren(ExprId::from_raw(0)), Span::new(0, 1));
        let e2 = arena.exprs.alloc(Expr::Paren(ExprId::from_raw(0)), Span::new(2, 3));
        let list = arena.list_exprs([e1, e2]);
        assert_eq!(arena.exprs_list(list), &[e1, e2]);
        assert!(arena.exprs_list(ListRef::EMPTY).is_empty());
        assert_eq!(arena.exprs.span(e2), Span::new(2, 3));
    }

    #[test]
    fn span_helpers() {
        let s = Span::new(2, 5).to(Span::new(4, 9));
        assert_eq!(s, Span::new(2, 9));
        assert_eq!(s.text("0123456789"), "2345678");
    }
}
