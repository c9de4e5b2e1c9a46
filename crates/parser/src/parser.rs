//! Recursive descent parser over the fully lexed token vector.
//!
//! Follows the Go reference grammar with two pieces of state the grammar
//! itself does not show:
//!
//! - `expr_lev` is negative inside `if`/`for`/`switch` headers, where `T {`
//!   opens the statement body rather than a composite literal. Parentheses,
//!   brackets, call arguments and literal bodies raise it again.
//! - `depth` bounds recursion so hostile input yields a diagnostic instead
//!   of a stack overflow.

use crate::ast::*;
use crate::error::{Diag, ParseFailure};
use crate::lexer::{LexedComment, Lexer, Tok};
use crate::parser_support::{ParamDecl, resolve_param_list};

type PResult<T> = Result<T, Diag>;

const MAX_DEPTH: u32 = 128;

/// Output of a successful parse.
#[derive(Debug)]
pub struct Parsed {
    pub arena: AstArena,
    pub interner: Interner,
    pub file: SourceFile,
}

/// Lexes and parses one source file.
pub fn parse(src: &str) -> Result<Parsed, ParseFailure> {
    let mut lexer = Lexer::new(src);
    let toks: Vec<_> = lexer.by_ref().collect();
    let mut diags = lexer.take_diags();
    let comments = lexer.take_comments();

    let mut p = Parser {
        toks,
        pos: 0,
        prev_end: 0,
        src_len: src.len(),
        expr_lev: 0,
        depth: 0,
        arena: AstArena::new(),
        interner: Interner::new(),
    };

    match p.source_file(&comments) {
        Ok(file) if diags.is_empty() => Ok(Parsed {
            arena: p.arena,
            interner: p.interner,
            file,
        }),
        Ok(_) => Err(ParseFailure { diags }),
        Err(d) => {
            diags.push(d);
            Err(ParseFailure { diags })
        }
    }
}

/// Result of a simple statement in a `for` header, where `range` may follow
/// the assignment operator.
enum Simple {
    Stmt(StmtId),
    Range {
        key: Option<ExprId>,
        value: Option<ExprId>,
        define: bool,
        expr: ExprId,
    },
}

struct Parser<'src> {
    toks: Vec<(usize, Tok<'src>, usize)>,
    pos: usize,
    prev_end: usize,
    src_len: usize,
    expr_lev: i32,
    depth: u32,
    arena: AstArena,
    interner: Interner,
}

fn binary_op(tok: Tok<'_>) -> Option<BinaryOp> {
    Some(match tok {
        Tok::LOr => BinaryOp::LOr,
        Tok::LAnd => BinaryOp::LAnd,
        Tok::EqEq => BinaryOp::Eq,
        Tok::NotEq => BinaryOp::Ne,
        Tok::Lt => BinaryOp::Lt,
        Tok::Le => BinaryOp::Le,
        Tok::Gt => BinaryOp::Gt,
        Tok::Ge => BinaryOp::Ge,
        Tok::Plus => BinaryOp::Add,
        Tok::Minus => BinaryOp::Sub,
        Tok::Pipe => BinaryOp::Or,
        Tok::Caret => BinaryOp::Xor,
        Tok::Star => BinaryOp::Mul,
        Tok::Slash => BinaryOp::Div,
        Tok::Percent => BinaryOp::Mod,
        Tok::Shl => BinaryOp::Shl,
        Tok::Shr => BinaryOp::Shr,
        Tok::Amp => BinaryOp::And,
        Tok::AndNot => BinaryOp::AndNot,
        _ => return None,
    })
}

fn assign_op(tok: Tok<'_>) -> Option<AssignOp> {
    Some(match tok {
        Tok::Assign => AssignOp::Assign,
        Tok::AddAssign => AssignOp::AddAssign,
        Tok::SubAssign => AssignOp::SubAssign,
        Tok::MulAssign => AssignOp::MulAssign,
        Tok::DivAssign => AssignOp::DivAssign,
        Tok::ModAssign => AssignOp::ModAssign,
        Tok::AndAssign => AssignOp::AndAssign,
        Tok::OrAssign => AssignOp::OrAssign,
        Tok::XorAssign => AssignOp::XorAssign,
        Tok::ShlAssign => AssignOp::ShlAssign,
        Tok::ShrAssign => AssignOp::ShrAssign,
        Tok::AndNotAssign => AssignOp::AndNotAssign,
        _ => return None,
    })
}

// =============================================================================
// Token cursor
// =============================================================================

impl<'src> Parser<'src> {
    #[inline]
    fn peek(&self) -> Option<Tok<'src>> {
        self.toks.get(self.pos).map(|t| t.1)
    }

    #[inline]
    fn peek_at(&self, n: usize) -> Option<Tok<'src>> {
        self.toks.get(self.pos + n).map(|t| t.1)
    }

    #[inline]
    fn at(&self, tok: Tok<'src>) -> bool {
        self.peek() == Some(tok)
    }

    fn cur_span(&self) -> Span {
        match self.toks.get(self.pos) {
            Some(&(start, _, end)) => Span::new(start, end),
            None => Span::new(self.src_len, self.src_len),
        }
    }

    #[inline]
    fn start(&self) -> usize {
        self.cur_span().start as usize
    }

    fn bump(&mut self) -> Span {
        let span = self.cur_span();
        if self.pos < self.toks.len() {
            self.pos += 1;
            self.prev_end = span.end as usize;
        }
        span
    }

    fn eat(&mut self, tok: Tok<'src>) -> Option<Span> {
        if self.at(tok) { Some(self.bump()) } else { None }
    }

    fn expect(&mut self, tok: Tok<'src>, what: &str) -> PResult<Span> {
        self.eat(tok).ok_or_else(|| self.unexpected(what))
    }

    fn expect_semi(&mut self) -> PResult<()> {
        if self.peek().is_none() || self.eat(Tok::Semi).is_some() {
            Ok(())
        } else {
            Err(self.unexpected("';' or newline"))
        }
    }

    fn unexpected(&self, what: &str) -> Diag {
        let found = match self.toks.get(self.pos) {
            None => "EOF".to_owned(),
            Some(&(start, Tok::Semi, end)) if start == end => "newline".to_owned(),
            Some((_, tok, _)) => tok.to_string(),
        };
        Diag::parse(self.cur_span(), format!("expected {what}, found {found}"))
    }

    /// Span from `start` to the end of the last consumed token.
    #[inline]
    fn span_from(&self, start: usize) -> Span {
        Span::new(start, self.prev_end.max(start))
    }

    fn enter(&mut self) -> PResult<()> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(Diag::parse(self.cur_span(), "nesting too deep"));
        }
        Ok(())
    }

    #[inline]
    fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    fn with_expr_lev<T>(&mut self, lev: i32, f: impl FnOnce(&mut Self) -> PResult<T>) -> PResult<T> {
        let old = std::mem::replace(&mut self.expr_lev, lev);
        let result = f(self);
        self.expr_lev = old;
        result
    }

    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> PResult<T>) -> PResult<T> {
        let lev = self.expr_lev + 1;
        self.with_expr_lev(lev, f)
    }

    fn ident(&mut self) -> PResult<IdentName> {
        match self.peek() {
            Some(Tok::Ident(name)) => {
                let pos = self.bump();
                Ok(IdentName {
                    sym: self.interner.intern(name),
                    pos,
                })
            }
            _ => Err(self.unexpected("identifier")),
        }
    }

    fn ident_list(&mut self) -> PResult<ListRef<IdentName>> {
        let mut names = vec![self.ident()?];
        while self.eat(Tok::Comma).is_some() {
            names.push(self.ident()?);
        }
        Ok(self.arena.list_ident_names(names))
    }
}

// =============================================================================
// Declarations
// =============================================================================

impl<'src> Parser<'src> {
    fn source_file(&mut self, comments: &[LexedComment]) -> PResult<SourceFile> {
        while self.eat(Tok::Semi).is_some() {}
        let package_pos = self.expect(Tok::KwPackage, "'package'")?;
        let name = self.ident()?;
        self.expect_semi()?;

        let mut decls = Vec::new();
        while let Some(tok) = self.peek() {
            let decl = match tok {
                Tok::Semi => {
                    self.bump();
                    continue;
                }
                Tok::KwImport => TopLevelDecl::Gen(self.gen_decl(GenDeclKind::Import)?),
                Tok::KwConst => TopLevelDecl::Gen(self.gen_decl(GenDeclKind::Const)?),
                Tok::KwVar => TopLevelDecl::Gen(self.gen_decl(GenDeclKind::Var)?),
                Tok::KwType => TopLevelDecl::Gen(self.gen_decl(GenDeclKind::Type)?),
                Tok::KwFunc => TopLevelDecl::Func(self.func_decl()?),
                _ => return Err(self.unexpected("declaration")),
            };
            decls.push(decl);
            self.expect_semi()?;
        }

        let decls = self.arena.list_top_decls(decls);
        let comments = self.comment_groups(comments);
        Ok(SourceFile {
            package_pos,
            name,
            decls,
            comments,
        })
    }

    fn comment_groups(&mut self, comments: &[LexedComment]) -> ListRef<CommentGroupId> {
        let mut groups = Vec::new();
        let mut i = 0;
        while i < comments.len() {
            let mut j = i + 1;
            while j < comments.len() && !comments[j].group_start {
                j += 1;
            }
            let run = &comments[i..j];
            let ids: Vec<CommentId> = run
                .iter()
                .map(|c| self.arena.comments.alloc(Comment { kind: c.kind }, c.span))
                .collect();
            let span = run[0].span.to(run[run.len() - 1].span);
            let list = self.arena.list_comment_ids(ids);
            groups.push(
                self.arena
                    .comment_groups
                    .alloc(CommentGroup { comments: list }, span),
            );
            i = j;
        }
        self.arena.list_comment_group_ids(groups)
    }

    fn gen_decl(&mut self, kind: GenDeclKind) -> PResult<GenDeclId> {
        let start = self.bump().start as usize;
        let mut specs = Vec::new();
        if self.eat(Tok::LParen).is_some() {
            while !self.at(Tok::RParen) {
                if self.eat(Tok::Semi).is_some() {
                    continue;
                }
                specs.push(self.spec(kind)?);
                if !self.at(Tok::RParen) {
                    self.expect(Tok::Semi, "';' or ')'")?;
                }
            }
            self.bump();
        } else {
            specs.push(self.spec(kind)?);
        }
        let specs = self.arena.list_specs(specs);
        let span = self.span_from(start);
        Ok(self.arena.gen_decls.alloc(GenDecl { kind, specs }, span))
    }

    fn spec(&mut self, kind: GenDeclKind) -> PResult<SpecId> {
        let start = self.start();
        let spec = match kind {
            GenDeclKind::Import => {
                let name = match self.peek() {
                    Some(Tok::Ident(_)) => Some(self.ident()?),
                    Some(Tok::Dot) => {
                        let pos = self.bump();
                        Some(IdentName {
                            sym: self.interner.intern("."),
                            pos,
                        })
                    }
                    _ => None,
                };
                let path = match self.peek() {
                    Some(Tok::StringLit(_) | Tok::RawStringLit(_)) => self.bump(),
                    _ => return Err(self.unexpected("import path")),
                };
                Spec::Import { name, path }
            }
            GenDeclKind::Type => {
                let name = self.ident()?;
                let alias = self.eat(Tok::Assign).is_some();
                let typ = self.typ()?;
                Spec::Type { name, alias, typ }
            }
            GenDeclKind::Const | GenDeclKind::Var => {
                let names = self.ident_list()?;
                let typ = match self.peek() {
                    None | Some(Tok::Assign | Tok::Semi | Tok::RParen) => None,
                    Some(_) => Some(self.typ()?),
                };
                let values = if self.eat(Tok::Assign).is_some() {
                    self.expr_list()?
                } else {
                    ListRef::EMPTY
                };
                Spec::Value {
                    names,
                    typ,
                    values,
                }
            }
        };
        let span = self.span_from(start);
        Ok(self.arena.specs.alloc(spec, span))
    }

    fn func_decl(&mut self) -> PResult<FuncDeclId> {
        let start = self.bump().start as usize;
        let recv = if self.at(Tok::LParen) {
            Some(self.parameters()?)
        } else {
            None
        };
        let name = self.ident()?;
        let sig = self.signature()?;
        let body = if self.at(Tok::LBrace) {
            Some(self.block()?)
        } else {
            None
        };
        let span = self.span_from(start);
        Ok(self.arena.funcs.alloc(
            FuncDecl {
                recv,
                name,
                sig,
                body,
            },
            span,
        ))
    }

    fn signature(&mut self) -> PResult<Signature> {
        let params = self.parameters()?;
        let results = if self.at(Tok::LParen) {
            self.parameters()?
        } else if self.at_type_start() {
            let start = self.start();
            let typ = self.typ()?;
            let span = self.span_from(start);
            let field = self.arena.fields.alloc(
                Field {
                    names: ListRef::EMPTY,
                    typ,
                },
                span,
            );
            self.arena.list_fields([field])
        } else {
            ListRef::EMPTY
        };
        Ok(Signature { params, results })
    }

    fn parameters(&mut self) -> PResult<ListRef<FieldId>> {
        self.expect(Tok::LParen, "'('")?;
        let mut params = Vec::new();
        while !self.at(Tok::RParen) {
            params.push(self.param_decl()?);
            if !self.at(Tok::RParen) {
                self.expect(Tok::Comma, "',' or ')'")?;
            }
        }
        self.bump();
        let fields = resolve_param_list(&mut self.arena, params);
        Ok(self.arena.list_fields(fields))
    }

    fn param_decl(&mut self) -> PResult<ParamDecl> {
        let start = self.start();
        if let Some(Tok::Ident(_)) = self.peek() {
            match self.peek_at(1) {
                Some(Tok::Comma | Tok::RParen) => {
                    let name = self.ident()?;
                    return Ok(ParamDecl {
                        names: vec![name],
                        typ: None,
                        span: name.pos,
                    });
                }
                Some(Tok::Dot) => {}
                _ => {
                    let name = self.ident()?;
                    let typ = self.param_type()?;
                    return Ok(ParamDecl {
                        names: vec![name],
                        typ: Some(typ),
                        span: self.span_from(start),
                    });
                }
            }
        }
        let typ = self.param_type()?;
        Ok(ParamDecl {
            names: Vec::new(),
            typ: Some(typ),
            span: self.span_from(start),
        })
    }

    fn param_type(&mut self) -> PResult<TypeId> {
        let start = self.start();
        if self.eat(Tok::Ellipsis).is_some() {
            let elem = self.typ()?;
            let span = self.span_from(start);
            return Ok(self.arena.types.alloc(Type::Variadic(elem), span));
        }
        self.typ()
    }
}

// =============================================================================
// Types
// =============================================================================

impl<'src> Parser<'src> {
    fn at_type_start(&self) -> bool {
        matches!(
            self.peek(),
            Some(
                Tok::Ident(_)
                    | Tok::Star
                    | Tok::LBrack
                    | Tok::LParen
                    | Tok::KwMap
                    | Tok::KwChan
                    | Tok::KwStruct
                    | Tok::KwInterface
                    | Tok::KwFunc
                    | Tok::Arrow
            )
        )
    }

    fn typ(&mut self) -> PResult<TypeId> {
        self.enter()?;
        let t = self.type_inner();
        self.leave();
        t
    }

    fn type_inner(&mut self) -> PResult<TypeId> {
        let start = self.start();
        let typ = match self.peek() {
            Some(Tok::Ident(_)) => {
                let name = self.ident()?;
                if self.at(Tok::Dot) && matches!(self.peek_at(1), Some(Tok::Ident(_))) {
                    self.bump();
                    let member = self.ident()?;
                    Type::Qualified {
                        pkg: name,
                        name: member,
                    }
                } else {
                    Type::Name(name.sym)
                }
            }
            Some(Tok::Star) => {
                self.bump();
                Type::Pointer(self.typ()?)
            }
            Some(Tok::LBrack) => {
                self.bump();
                if self.eat(Tok::RBrack).is_some() {
                    Type::Slice(self.typ()?)
                } else {
                    let len = if self.eat(Tok::Ellipsis).is_some() {
                        None
                    } else {
                        Some(self.nested(|p| p.expr())?)
                    };
                    self.expect(Tok::RBrack, "']'")?;
                    Type::Array {
                        len,
                        elem: self.typ()?,
                    }
                }
            }
            Some(Tok::LParen) => {
                self.bump();
                let inner = self.typ()?;
                self.expect(Tok::RParen, "')'")?;
                Type::Paren(inner)
            }
            Some(Tok::KwMap) => {
                self.bump();
                self.expect(Tok::LBrack, "'['")?;
                let key = self.typ()?;
                self.expect(Tok::RBrack, "']'")?;
                Type::Map {
                    key,
                    value: self.typ()?,
                }
            }
            Some(Tok::KwChan) => {
                self.bump();
                let dir = if self.eat(Tok::Arrow).is_some() {
                    ChanDir::Send
                } else {
                    ChanDir::Both
                };
                Type::Chan {
                    dir,
                    elem: self.typ()?,
                }
            }
            Some(Tok::Arrow) => {
                self.bump();
                self.expect(Tok::KwChan, "'chan'")?;
                Type::Chan {
                    dir: ChanDir::Recv,
                    elem: self.typ()?,
                }
            }
            Some(Tok::KwStruct) => {
                self.bump();
                Type::Struct {
                    fields: self.struct_fields()?,
                }
            }
            Some(Tok::KwInterface) => {
                self.bump();
                Type::Interface {
                    methods: self.interface_elems()?,
                }
            }
            Some(Tok::KwFunc) => {
                self.bump();
                Type::Func(self.signature()?)
            }
            _ => return Err(self.unexpected("type")),
        };
        let span = self.span_from(start);
        Ok(self.arena.types.alloc(typ, span))
    }

    fn struct_fields(&mut self) -> PResult<ListRef<FieldId>> {
        self.expect(Tok::LBrace, "'{'")?;
        let mut fields = Vec::new();
        while !self.at(Tok::RBrace) {
            if self.eat(Tok::Semi).is_some() {
                continue;
            }
            let start = self.start();
            let embedded = match (self.peek(), self.peek_at(1)) {
                (Some(Tok::Star), _) => true,
                (
                    Some(Tok::Ident(_)),
                    Some(
                        Tok::Dot
                        | Tok::Semi
                        | Tok::RBrace
                        | Tok::StringLit(_)
                        | Tok::RawStringLit(_),
                    ),
                ) => true,
                _ => false,
            };
            let names = if embedded {
                ListRef::EMPTY
            } else {
                self.ident_list()?
            };
            let typ = self.typ()?;
            if matches!(self.peek(), Some(Tok::StringLit(_) | Tok::RawStringLit(_))) {
                self.bump();
            }
            let span = self.span_from(start);
            fields.push(self.arena.fields.alloc(Field { names, typ }, span));
            if !self.at(Tok::RBrace) {
                self.expect(Tok::Semi, "';' or '}'")?;
            }
        }
        self.bump();
        Ok(self.arena.list_fields(fields))
    }

    fn interface_elems(&mut self) -> PResult<ListRef<FieldId>> {
        self.expect(Tok::LBrace, "'{'")?;
        let mut methods = Vec::new();
        while !self.at(Tok::RBrace) {
            if self.eat(Tok::Semi).is_some() {
                continue;
            }
            let start = self.start();
            let field = if matches!(self.peek(), Some(Tok::Ident(_)))
                && self.peek_at(1) == Some(Tok::LParen)
            {
                let name = self.ident()?;
                let sig = self.signature()?;
                let span = self.span_from(start);
                let typ = self.arena.types.alloc(Type::Func(sig), span);
                Field {
                    names: self.arena.list_ident_names([name]),
                    typ,
                }
            } else {
                Field {
                    names: ListRef::EMPTY,
                    typ: self.typ()?,
                }
            };
            let span = self.span_from(start);
            methods.push(self.arena.fields.alloc(field, span));
            if !self.at(Tok::RBrace) {
                self.expect(Tok::Semi, "';' or '}'")?;
            }
        }
        self.bump();
        Ok(self.arena.list_fields(methods))
    }
}

// =============================================================================
// Statements
// =============================================================================

impl<'src> Parser<'src> {
    fn block(&mut self) -> PResult<Block> {
        let l_brace = self.expect(Tok::LBrace, "'{'")?;
        let stmts = self.stmt_list()?;
        let r_brace = self.expect(Tok::RBrace, "'}'")?;
        Ok(Block {
            l_brace,
            stmts,
            r_brace,
        })
    }

    fn stmt_list(&mut self) -> PResult<ListRef<StmtId>> {
        let mut stmts = Vec::new();
        loop {
            match self.peek() {
                None | Some(Tok::RBrace | Tok::KwCase | Tok::KwDefault) => break,
                Some(Tok::Semi) => {
                    self.bump();
                }
                Some(_) => {
                    stmts.push(self.stmt()?);
                    if !matches!(self.peek(), Some(Tok::RBrace | Tok::KwCase | Tok::KwDefault)) {
                        self.expect(Tok::Semi, "';' or newline")?;
                    }
                }
            }
        }
        Ok(self.arena.list_stmts(stmts))
    }

    fn stmt(&mut self) -> PResult<StmtId> {
        self.enter()?;
        let s = self.stmt_inner();
        self.leave();
        s
    }

    fn stmt_inner(&mut self) -> PResult<StmtId> {
        let start = self.start();
        let stmt = match self.peek() {
            Some(Tok::KwVar) => Stmt::Decl(self.gen_decl(GenDeclKind::Var)?),
            Some(Tok::KwConst) => Stmt::Decl(self.gen_decl(GenDeclKind::Const)?),
            Some(Tok::KwType) => Stmt::Decl(self.gen_decl(GenDeclKind::Type)?),
            Some(Tok::KwGo) => {
                self.bump();
                Stmt::Go { call: self.expr()? }
            }
            Some(Tok::KwDefer) => {
                self.bump();
                Stmt::Defer { call: self.expr()? }
            }
            Some(Tok::KwReturn) => {
                self.bump();
                let results = match self.peek() {
                    None | Some(Tok::Semi | Tok::RBrace) => ListRef::EMPTY,
                    Some(_) => self.expr_list()?,
                };
                Stmt::Return { results }
            }
            Some(Tok::KwBreak) => self.branch(BranchKind::Break)?,
            Some(Tok::KwContinue) => self.branch(BranchKind::Continue)?,
            Some(Tok::KwGoto) => self.branch(BranchKind::Goto)?,
            Some(Tok::KwFallthrough) => self.branch(BranchKind::Fallthrough)?,
            Some(Tok::LBrace) => Stmt::Block(self.block()?),
            Some(Tok::KwIf) => return self.if_stmt(),
            Some(Tok::KwFor) => return self.for_stmt(),
            Some(Tok::KwSwitch) => return self.switch_stmt(),
            Some(Tok::KwSelect) => return self.select_stmt(),
            Some(Tok::Ident(_)) if self.peek_at(1) == Some(Tok::Colon) => {
                let label = self.ident()?;
                self.bump();
                let stmt = if self.at(Tok::RBrace) {
                    let span = self.span_from(self.prev_end);
                    self.arena.stmts.alloc(Stmt::Empty, span)
                } else {
                    self.stmt()?
                };
                Stmt::Labeled { label, stmt }
            }
            _ => return self.simple_stmt(),
        };
        let span = self.span_from(start);
        Ok(self.arena.stmts.alloc(stmt, span))
    }

    fn branch(&mut self, kind: BranchKind) -> PResult<Stmt> {
        self.bump();
        let label = match self.peek() {
            Some(Tok::Ident(_)) if kind != BranchKind::Fallthrough => Some(self.ident()?),
            _ => None,
        };
        Ok(Stmt::Branch { kind, label })
    }

    fn simple_stmt(&mut self) -> PResult<StmtId> {
        match self.simple_stmt_or_range(false)? {
            Simple::Stmt(id) => Ok(id),
            Simple::Range { expr, .. } => Err(Diag::parse(
                self.arena.exprs.span(expr),
                "range clause outside for statement",
            )),
        }
    }

    fn simple_stmt_or_range(&mut self, range_ok: bool) -> PResult<Simple> {
        let start = self.start();
        let lhs = self.expr_vec()?;
        let next = self.peek();

        let stmt = if next == Some(Tok::Define) {
            self.bump();
            if range_ok && self.eat(Tok::KwRange).is_some() {
                return self.range_clause(&lhs, true);
            }
            let mut names = Vec::with_capacity(lhs.len());
            for &e in &lhs {
                match self.arena.exprs[e] {
                    Expr::Ident(sym) => names.push(IdentName {
                        sym,
                        pos: self.arena.exprs.span(e),
                    }),
                    _ => {
                        return Err(Diag::parse(
                            self.arena.exprs.span(e),
                            "non-name on left side of :=",
                        ));
                    }
                }
            }
            let names = self.arena.list_ident_names(names);
            let values = self.expr_list()?;
            Stmt::ShortVarDecl { names, values }
        } else if let Some(op) = next.and_then(assign_op) {
            self.bump();
            if range_ok && op == AssignOp::Assign && self.eat(Tok::KwRange).is_some() {
                return self.range_clause(&lhs, false);
            }
            let lhs = self.arena.list_exprs(lhs);
            let rhs = self.expr_list()?;
            Stmt::Assign { lhs, op, rhs }
        } else {
            let &[x] = lhs.as_slice() else {
                return Err(self.unexpected("':=', '=' or assignment operator"));
            };
            match next {
                Some(Tok::Inc) => {
                    self.bump();
                    Stmt::IncDec {
                        expr: x,
                        op: IncDecOp::Inc,
                    }
                }
                Some(Tok::Dec) => {
                    self.bump();
                    Stmt::IncDec {
                        expr: x,
                        op: IncDecOp::Dec,
                    }
                }
                Some(Tok::Arrow) => {
                    self.bump();
                    Stmt::Send {
                        chan: x,
                        value: self.expr()?,
                    }
                }
                _ => Stmt::Expr(x),
            }
        };

        let span = self.span_from(start);
        Ok(Simple::Stmt(self.arena.stmts.alloc(stmt, span)))
    }

    fn range_clause(&mut self, lhs: &[ExprId], define: bool) -> PResult<Simple> {
        if lhs.len() > 2 {
            return Err(Diag::parse(
                self.arena.exprs.span(lhs[2]),
                "range clause permits at most two iteration variables",
            ));
        }
        let expr = self.expr()?;
        Ok(Simple::Range {
            key: lhs.first().copied(),
            value: lhs.get(1).copied(),
            define,
            expr,
        })
    }

    fn stmt_as_cond(&self, id: StmtId, what: &str) -> PResult<ExprId> {
        match self.arena.stmts[id] {
            Stmt::Expr(e) => Ok(e),
            _ => Err(Diag::parse(
                self.arena.stmts.span(id),
                format!("expected {what}, found simple statement"),
            )),
        }
    }

    fn if_stmt(&mut self) -> PResult<StmtId> {
        let start = self.bump().start as usize;
        if self.at(Tok::LBrace) {
            return Err(Diag::parse(
                self.cur_span(),
                "missing condition in if statement",
            ));
        }
        let (init, cond) = self.with_expr_lev(-1, |p| p.if_header())?;
        let then_block = self.block()?;

        let else_stmt = if self.eat(Tok::KwElse).is_some() {
            match self.peek() {
                Some(Tok::KwIf) => Some(self.if_stmt()?),
                Some(Tok::LBrace) => {
                    let block_start = self.start();
                    let block = self.block()?;
                    let span = self.span_from(block_start);
                    Some(self.arena.stmts.alloc(Stmt::Block(block), span))
                }
                _ => return Err(self.unexpected("'if' or '{' after else")),
            }
        } else {
            None
        };

        let span = self.span_from(start);
        Ok(self.arena.stmts.alloc(
            Stmt::If {
                init,
                cond,
                then_block,
                else_stmt,
            },
            span,
        ))
    }

    fn if_header(&mut self) -> PResult<(Option<StmtId>, ExprId)> {
        let mut init = None;
        if self.eat(Tok::Semi).is_none() {
            let s = self.simple_stmt()?;
            if self.eat(Tok::Semi).is_none() {
                return Ok((None, self.stmt_as_cond(s, "condition")?));
            }
            init = Some(s);
        }
        let cond = self.expr()?;
        Ok((init, cond))
    }

    fn for_stmt(&mut self) -> PResult<StmtId> {
        let start = self.bump().start as usize;
        let kind = self.with_expr_lev(-1, |p| p.for_header())?;
        let body = self.block()?;
        let span = self.span_from(start);
        Ok(self.arena.stmts.alloc(Stmt::For { kind, body }, span))
    }

    fn for_header(&mut self) -> PResult<ForKind> {
        if self.at(Tok::LBrace) {
            return Ok(ForKind::Infinite);
        }
        if self.eat(Tok::KwRange).is_some() {
            let expr = self.expr()?;
            return Ok(ForKind::Range {
                key: None,
                value: None,
                define: false,
                expr,
            });
        }

        let mut init = None;
        if !self.at(Tok::Semi) {
            match self.simple_stmt_or_range(true)? {
                Simple::Range {
                    key,
                    value,
                    define,
                    expr,
                } => {
                    return Ok(ForKind::Range {
                        key,
                        value,
                        define,
                        expr,
                    });
                }
                Simple::Stmt(s) => {
                    if !self.at(Tok::Semi) {
                        return Ok(ForKind::Cond(self.stmt_as_cond(s, "for loop condition")?));
                    }
                    init = Some(s);
                }
            }
        }

        self.expect(Tok::Semi, "';'")?;
        let cond = if self.at(Tok::Semi) {
            None
        } else {
            Some(self.expr()?)
        };
        self.expect(Tok::Semi, "';'")?;
        let post = if self.at(Tok::LBrace) {
            None
        } else {
            Some(self.simple_stmt()?)
        };
        Ok(ForKind::Clause { init, cond, post })
    }

    fn switch_stmt(&mut self) -> PResult<StmtId> {
        let start = self.bump().start as usize;
        let (init, tag) = self.with_expr_lev(-1, |p| p.switch_header())?;
        self.expect(Tok::LBrace, "'{'")?;
        let mut clauses = Vec::new();
        while !self.at(Tok::RBrace) {
            let clause_start = self.start();
            let exprs = match self.peek() {
                Some(Tok::KwCase) => {
                    self.bump();
                    self.expr_list()?
                }
                Some(Tok::KwDefault) => {
                    self.bump();
                    ListRef::EMPTY
                }
                _ => return Err(self.unexpected("'case' or 'default'")),
            };
            self.expect(Tok::Colon, "':'")?;
            let body = self.stmt_list()?;
            let span = self.span_from(clause_start);
            clauses.push(self.arena.case_clauses.alloc(
                CaseClause {
                    exprs,
                    comm: None,
                    body,
                },
                span,
            ));
        }
        self.bump();
        let clauses = self.arena.list_case_clauses(clauses);
        let span = self.span_from(start);
        Ok(self
            .arena
            .stmts
            .alloc(Stmt::Switch { init, tag, clauses }, span))
    }

    fn switch_header(&mut self) -> PResult<(Option<StmtId>, Option<StmtId>)> {
        if self.at(Tok::LBrace) {
            return Ok((None, None));
        }
        let first = if self.at(Tok::Semi) {
            None
        } else {
            Some(self.simple_stmt()?)
        };
        if self.eat(Tok::Semi).is_some() {
            let tag = if self.at(Tok::LBrace) {
                None
            } else {
                Some(self.simple_stmt()?)
            };
            return Ok((first, tag));
        }
        Ok((None, first))
    }

    fn select_stmt(&mut self) -> PResult<StmtId> {
        let start = self.bump().start as usize;
        self.expect(Tok::LBrace, "'{'")?;
        let mut clauses = Vec::new();
        while !self.at(Tok::RBrace) {
            let clause_start = self.start();
            let comm = match self.peek() {
                Some(Tok::KwCase) => {
                    self.bump();
                    Some(self.simple_stmt()?)
                }
                Some(Tok::KwDefault) => {
                    self.bump();
                    None
                }
                _ => return Err(self.unexpected("'case' or 'default'")),
            };
            self.expect(Tok::Colon, "':'")?;
            let body = self.stmt_list()?;
            let span = self.span_from(clause_start);
            clauses.push(self.arena.case_clauses.alloc(
                CaseClause {
                    exprs: ListRef::EMPTY,
                    comm,
                    body,
                },
                span,
            ));
        }
        self.bump();
        let clauses = self.arena.list_case_clauses(clauses);
        let span = self.span_from(start);
        Ok(self.arena.stmts.alloc(Stmt::Select { clauses }, span))
    }
}

// =============================================================================
// Expressions
// =============================================================================

impl<'src> Parser<'src> {
    fn expr(&mut self) -> PResult<ExprId> {
        self.enter()?;
        let e = self.binary_expr(1);
        self.leave();
        e
    }

    fn expr_vec(&mut self) -> PResult<Vec<ExprId>> {
        let mut list = vec![self.expr()?];
        while self.eat(Tok::Comma).is_some() {
            list.push(self.expr()?);
        }
        Ok(list)
    }

    fn expr_list(&mut self) -> PResult<ListRef<ExprId>> {
        let list = self.expr_vec()?;
        Ok(self.arena.list_exprs(list))
    }

    /// Each folded operator deepens the left spine by one, so the chain is
    /// charged against the same budget as nesting.
    fn binary_expr(&mut self, min_prec: u8) -> PResult<ExprId> {
        let depth = self.depth;
        let x = self.binary_chain(min_prec);
        self.depth = depth;
        x
    }

    fn binary_chain(&mut self, min_prec: u8) -> PResult<ExprId> {
        let start = self.start();
        let mut x = self.unary_expr()?;
        while let Some(op) = self.peek().and_then(binary_op) {
            if op.precedence() < min_prec {
                break;
            }
            self.enter()?;
            self.bump();
            let y = self.binary_expr(op.precedence() + 1)?;
            let span = self.span_from(start);
            x = self.arena.exprs.alloc(
                Expr::Binary {
                    left: x,
                    op,
                    right: y,
                },
                span,
            );
        }
        Ok(x)
    }

    fn unary_expr(&mut self) -> PResult<ExprId> {
        let start = self.start();
        let op = match self.peek() {
            Some(Tok::Plus) => Some(UnaryOp::Add),
            Some(Tok::Minus) => Some(UnaryOp::Sub),
            Some(Tok::Bang) => Some(UnaryOp::Not),
            Some(Tok::Caret) => Some(UnaryOp::Xor),
            Some(Tok::Amp) => Some(UnaryOp::Addr),
            Some(Tok::Arrow) => Some(UnaryOp::Recv),
            Some(Tok::Star) => None,
            _ => return self.primary_expr(),
        };
        self.bump();

        self.enter()?;
        let operand = self.unary_expr();
        self.leave();
        let operand = operand?;

        let expr = match op {
            Some(op) => Expr::Unary { op, expr: operand },
            None => Expr::Star(operand),
        };
        let span = self.span_from(start);
        Ok(self.arena.exprs.alloc(expr, span))
    }

    fn primary_expr(&mut self) -> PResult<ExprId> {
        let depth = self.depth;
        let x = self.primary_chain();
        self.depth = depth;
        x
    }

    fn primary_chain(&mut self) -> PResult<ExprId> {
        let start = self.start();
        let mut x = self.operand()?;
        loop {
            let expr = match self.peek() {
                Some(Tok::Dot) => {
                    self.enter()?;
                    self.bump();
                    match self.peek() {
                        Some(Tok::Ident(_)) => Expr::Selector {
                            expr: x,
                            sel: self.ident()?,
                        },
                        Some(Tok::LParen) => {
                            self.bump();
                            let typ = if self.eat(Tok::KwType).is_some() {
                                None
                            } else {
                                Some(self.typ()?)
                            };
                            self.expect(Tok::RParen, "')'")?;
                            Expr::TypeAssert { expr: x, typ }
                        }
                        _ => return Err(self.unexpected("selector or type assertion")),
                    }
                }
                Some(Tok::LBrack) => {
                    self.enter()?;
                    self.bump();
                    self.nested(|p| p.index_or_slice(x))?
                }
                Some(Tok::LParen) => {
                    self.enter()?;
                    self.bump();
                    self.nested(|p| p.call_args(x))?
                }
                Some(Tok::LBrace)
                    if self.is_literal_type(x) && (self.expr_lev >= 0 || !self.is_type_name(x)) =>
                {
                    self.enter()?;
                    let typ = self.expr_to_type(x)?;
                    let elems = self.literal_value()?;
                    Expr::CompositeLit {
                        typ: Some(typ),
                        elems,
                    }
                }
                _ => return Ok(x),
            };
            let span = self.span_from(start);
            x = self.arena.exprs.alloc(expr, span);
        }
    }

    fn operand(&mut self) -> PResult<ExprId> {
        let start = self.start();
        let expr = match self.peek() {
            Some(Tok::Ident(name)) => {
                self.bump();
                Expr::Ident(self.interner.intern(name))
            }
            Some(Tok::IntLit(_)) => self.basic_lit(BasicLitKind::Int),
            Some(Tok::FloatLit(_)) => self.basic_lit(BasicLitKind::Float),
            Some(Tok::ImagLit(_)) => self.basic_lit(BasicLitKind::Imag),
            Some(Tok::RuneLit(_)) => self.basic_lit(BasicLitKind::Rune),
            Some(Tok::StringLit(_) | Tok::RawStringLit(_)) => self.basic_lit(BasicLitKind::String),
            Some(Tok::LParen) => {
                self.bump();
                let inner = self.nested(|p| p.expr())?;
                self.expect(Tok::RParen, "')'")?;
                Expr::Paren(inner)
            }
            Some(Tok::KwFunc) => {
                self.bump();
                let sig = self.signature()?;
                if self.at(Tok::LBrace) {
                    let body = self.nested(|p| p.block())?;
                    Expr::FuncLit { sig, body }
                } else {
                    let span = self.span_from(start);
                    Expr::Type(self.arena.types.alloc(Type::Func(sig), span))
                }
            }
            Some(Tok::LBrack | Tok::KwMap | Tok::KwChan | Tok::KwStruct | Tok::KwInterface) => {
                Expr::Type(self.typ()?)
            }
            _ => return Err(self.unexpected("expression")),
        };
        let span = self.span_from(start);
        Ok(self.arena.exprs.alloc(expr, span))
    }

    #[inline]
    fn basic_lit(&mut self, kind: BasicLitKind) -> Expr {
        self.bump();
        Expr::BasicLit(BasicLit { kind })
    }

    fn index_or_slice(&mut self, x: ExprId) -> PResult<Expr> {
        let mut lo = None;
        if !self.at(Tok::Colon) {
            let index = self.expr()?;
            if self.eat(Tok::RBrack).is_some() {
                return Ok(Expr::Index { expr: x, index });
            }
            lo = Some(index);
        }
        self.expect(Tok::Colon, "':' or ']'")?;
        let hi = match self.peek() {
            Some(Tok::Colon | Tok::RBrack) => None,
            _ => Some(self.expr()?),
        };
        let max = if self.eat(Tok::Colon).is_some() {
            Some(self.expr()?)
        } else {
            None
        };
        self.expect(Tok::RBrack, "']'")?;
        Ok(Expr::Slice {
            expr: x,
            lo,
            hi,
            max,
        })
    }

    fn call_args(&mut self, fun: ExprId) -> PResult<Expr> {
        let mut args = Vec::new();
        let mut variadic = false;
        while !self.at(Tok::RParen) {
            args.push(self.expr()?);
            if self.eat(Tok::Ellipsis).is_some() {
                variadic = true;
            }
            if !self.at(Tok::RParen) {
                self.expect(Tok::Comma, "',' or ')'")?;
            }
        }
        self.bump();
        Ok(Expr::Call {
            fun,
            args: self.arena.list_exprs(args),
            variadic,
        })
    }

    fn literal_value(&mut self) -> PResult<ListRef<ExprId>> {
        self.enter()?;
        let elems = self.nested(|p| p.literal_value_inner());
        self.leave();
        elems
    }

    fn literal_value_inner(&mut self) -> PResult<ListRef<ExprId>> {
        self.expect(Tok::LBrace, "'{'")?;
        let mut elems = Vec::new();
        while !self.at(Tok::RBrace) {
            let start = self.start();
            let key = self.element()?;
            let elem = if self.eat(Tok::Colon).is_some() {
                let value = self.element()?;
                let span = self.span_from(start);
                self.arena.exprs.alloc(Expr::KeyValue { key, value }, span)
            } else {
                key
            };
            elems.push(elem);
            if !self.at(Tok::RBrace) {
                self.expect(Tok::Comma, "',' or '}'")?;
            }
        }
        self.bump();
        Ok(self.arena.list_exprs(elems))
    }

    fn element(&mut self) -> PResult<ExprId> {
        if self.at(Tok::LBrace) {
            let start = self.start();
            let elems = self.literal_value()?;
            let span = self.span_from(start);
            return Ok(self
                .arena
                .exprs
                .alloc(Expr::CompositeLit { typ: None, elems }, span));
        }
        self.expr()
    }

    fn is_type_name(&self, x: ExprId) -> bool {
        match self.arena.exprs[x] {
            Expr::Ident(_) => true,
            Expr::Selector { expr, .. } => matches!(self.arena.exprs[expr], Expr::Ident(_)),
            _ => false,
        }
    }

    fn is_literal_type(&self, x: ExprId) -> bool {
        match self.arena.exprs[x] {
            Expr::Type(t) => matches!(
                self.arena.types[t],
                Type::Array { .. } | Type::Slice(_) | Type::Map { .. } | Type::Struct { .. }
            ),
            _ => self.is_type_name(x),
        }
    }

    /// Reinterprets a composite literal's type operand as a type node.
    fn expr_to_type(&mut self, x: ExprId) -> PResult<TypeId> {
        let span = self.arena.exprs.span(x);
        let typ = match self.arena.exprs[x] {
            Expr::Type(t) => return Ok(t),
            Expr::Ident(sym) => Type::Name(sym),
            Expr::Selector { expr, sel } => match self.arena.exprs[expr] {
                Expr::Ident(pkg) => Type::Qualified {
                    pkg: IdentName {
                        sym: pkg,
                        pos: self.arena.exprs.span(expr),
                    },
                    name: sel,
                },
                _ => return Err(Diag::parse(span, "expected type")),
            },
            _ => return Err(Diag::parse(span, "expected type")),
        };
        Ok(self.arena.types.alloc(typ, span))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_ok(src: &str) -> Parsed {
        match parse(src) {
            Ok(p) => p,
            Err(e) => panic!("parse failed: {e}\n{src}"),
        }
    }

    fn first_func_body(p: &Parsed) -> Vec<Stmt> {
        let decls = p.arena.top_decls(p.file.decls);
        let func = decls
            .iter()
            .find_map(|d| match d {
                TopLevelDecl::Func(f) => Some(*f),
                _ => None,
            })
            .expect("no func");
        let body = p.arena.funcs[func].body.expect("no body");
        p.arena
            .stmts_list(body.stmts)
            .iter()
            .map(|&s| p.arena.stmts[s])
            .collect()
    }

    #[test]
    fn precedence_groups_multiplication_first() {
        let p = parse_ok("package p\nfunc f() { x = a + b * c }\n");
        let stmts = first_func_body(&p);
        let Stmt::Assign { rhs, .. } = stmts[0] else {
            panic!("expected assignment");
        };
        let root = p.arena.exprs_list(rhs)[0];
        let Expr::Binary { op, right, .. } = p.arena.exprs[root] else {
            panic!("expected binary");
        };
        assert_eq!(op, BinaryOp::Add);
        assert!(matches!(
            p.arena.exprs[right],
            Expr::Binary {
                op: BinaryOp::Mul,
                ..
            }
        ));
    }

    #[test]
    fn composite_literal_not_taken_in_if_header() {
        let p = parse_ok("package p\nfunc f() { if x { y() } }\n");
        let stmts = first_func_body(&p);
        let Stmt::If { cond, then_block, .. } = stmts[0] else {
            panic!("expected if");
        };
        assert!(matches!(p.arena.exprs[cond], Expr::Ident(_)));
        assert_eq!(then_block.stmts.len(), 1);
    }

    #[test]
    fn for_forms() {
        let p = parse_ok(
            "package p\nfunc f() {\n\tfor {}\n\tfor x < 3 {}\n\tfor i := 0; i < 3; i++ {}\n\tfor k, v := range m {}\n}\n",
        );
        let kinds: Vec<_> = first_func_body(&p)
            .into_iter()
            .map(|s| match s {
                Stmt::For { kind, .. } => kind,
                other => panic!("expected for, got {other:?}"),
            })
            .collect();
        assert!(matches!(kinds[0], ForKind::Infinite));
        assert!(matches!(kinds[1], ForKind::Cond(_)));
        assert!(matches!(kinds[2], ForKind::Clause { init: Some(_), cond: Some(_), post: Some(_) }));
        assert!(matches!(kinds[3], ForKind::Range { define: true, value: Some(_), .. }));
    }

    #[test]
    fn grouped_params_share_type() {
        let p = parse_ok("package p\nfunc f(a, b int, s string) {}\n");
        let TopLevelDecl::Func(f) = p.arena.top_decls(p.file.decls)[0] else {
            panic!("expected func");
        };
        let params = p.arena.fields_list(p.arena.funcs[f].sig.params);
        assert_eq!(params.len(), 2);
        assert_eq!(p.arena.fields[params[0]].names.len(), 2);
    }

    #[test]
    fn syntax_error_is_positioned() {
        let err = parse("package p\nfunc f() { x = }\n").unwrap_err();
        assert_eq!(err.diags.len(), 1);
        assert!(err.diags[0].message.starts_with("expected expression"));
        assert_eq!(err.diags[0].span.start, 25);
    }

    #[test]
    fn deep_nesting_is_rejected_not_overflowed() {
        let src = format!("package p\nvar x = {}1{}\n", "(".repeat(5000), ")".repeat(5000));
        let err = parse(&src).unwrap_err();
        assert!(err.diags.iter().any(|d| d.message == "nesting too deep"));
    }

    #[test]
    fn long_operator_chain_is_rejected_not_overflowed() {
        let terms = vec!["a"; 10_000].join(" + ");
        let src = format!("package p
func f() {{
	g({terms})
}}
");
        let err = parse(&src).unwrap_err();
        assert!(err.diags.iter().any(|d| d.message == "nesting too deep"));
    }

    #[test]
    fn long_selector_and_call_chains_are_rejected() {
        let sels = format!("package p
var x = a{}
", ".b".repeat(10_000));
        let err = parse(&sels).unwrap_err();
        assert!(err.diags.iter().any(|d| d.message == "nesting too deep"));

        let calls = format!("package p
var x = f{}
", "()".repeat(10_000));
        let err = parse(&calls).unwrap_err();
        assert!(err.diags.iter().any(|d| d.message == "nesting too deep"));
    }

    #[test]
    fn depth_is_restored_after_a_chain() {
        let terms = vec!["a"; 64].join(" + ");
        let src = format!("package p
var x = {terms}
var y = {terms}
var z = {terms}
");
        assert!(parse(&src).is_ok());
    }
}
