//! A small fixed statement/expression grammar used by the IR translator's
//! tests and by callers who want a ready-made scenario without writing
//! their own grammar file. Left recursion already removed (`RelExpr'`,
//! `AddExpr'`, `MulExpr'`) so it is directly LL(1).

pub const TAC_SOURCE_GRAMMAR: &str = "\
%start Program
Program -> StmtList
StmtList -> Stmt StmtList
   | ε
Stmt -> AssignStmt
   | IfStmt
   | WhileStmt
   | Block
AssignStmt -> ID EQUAL Expr SEMICOLON
IfStmt -> IF LPAREN Expr RPAREN Stmt ElsePart
ElsePart -> ELSE Stmt
   | ε
WhileStmt -> WHILE LPAREN Expr RPAREN Stmt
Block -> LBRACE StmtList RBRACE
Expr -> RelExpr
RelExpr -> AddExpr RelExpr'
RelExpr' -> EQUAL_EQUAL AddExpr RelExpr'
   | NOT_EQUAL AddExpr RelExpr'
   | GREATER AddExpr RelExpr'
   | LESS AddExpr RelExpr'
   | GREATER_EQUAL AddExpr RelExpr'
   | LESS_EQUAL AddExpr RelExpr'
   | ε
AddExpr -> MulExpr AddExpr'
AddExpr' -> PLUS MulExpr AddExpr'
   | MINUS MulExpr AddExpr'
   | ε
MulExpr -> UnaryExpr MulExpr'
MulExpr' -> MULTIPLY UnaryExpr MulExpr'
   | DIVIDE UnaryExpr MulExpr'
   | MOD UnaryExpr MulExpr'
   | ε
UnaryExpr -> MINUS UnaryExpr
   | Primary
Primary -> ID
   | NUMBER
   | FLOAT_NUMBER
   | LPAREN Expr RPAREN
";

/// The lexer rules that tokenize `TAC_SOURCE_GRAMMAR`'s input language.
pub const TAC_SOURCE_LEXER_RULES: &str = "\
IF if
ELSE else
WHILE while
ID [a-zA-Z_][a-zA-Z_0-9]*
FLOAT_NUMBER [0-9]+\\.[0-9]+
NUMBER [0-9]+
EQUAL_EQUAL ==
NOT_EQUAL !=
GREATER_EQUAL >=
LESS_EQUAL <=
EQUAL =
GREATER >
LESS <
PLUS \\+
MINUS \\-
MULTIPLY \\*
DIVIDE /
MOD %
LPAREN \\(
RPAREN \\)
LBRACE \\{
RBRACE \\}
SEMICOLON ;
WHITESPACE [\\ \\t\\n\\r]+ IGNORE
";
