//! Pattern tables for the programming languages.
//!
//! Punctuation is matched one character at a time; runs are merged after
//! lexing. `.` and `:` are punctuation in every table so a cloze marker lexes
//! the same way regardless of language.

use super::lexer::LexerRules;
use super::token::TokenKind;
use crate::language::Language;
use once_cell::sync::Lazy;

/// Rules for a non-markup language. `Html` has its own lexer.
pub fn for_language(language: Language) -> Option<&'static LexerRules> {
    match language {
        Language::Python => Some(&PYTHON),
        Language::JavaScript => Some(&JAVASCRIPT),
        Language::Bash => Some(&BASH),
        Language::Scheme => Some(&SCHEME),
        Language::Java => Some(&JAVA),
        Language::Html => None,
    }
}

const PUNCTUATION: &str = r"^[()\[\]{}.,:;]";

static PYTHON: Lazy<LexerRules> = Lazy::new(|| {
    LexerRules::new(&[
        (r"^#.*", TokenKind::Comment),
        (r"^\s+", TokenKind::Whitespace),
        // Triple-quoted strings before ordinary ones
        (r#"^[rRbBuUfF]{0,2}"""(?s:.)*?""""#, TokenKind::String),
        (r"^[rRbBuUfF]{0,2}'''(?s:.)*?'''", TokenKind::String),
        (r#"^[rRbBuUfF]{0,2}"([^"\\\n]|\\.)*""#, TokenKind::String),
        (r"^[rRbBuUfF]{0,2}'([^'\\\n]|\\.)*'", TokenKind::String),
        // Unclosed strings run to end of line
        (r#"^"([^"\\\n]|\\.)*"#, TokenKind::String),
        (r"^'([^'\\\n]|\\.)*", TokenKind::String),
        (r"^0[xXoObB][0-9a-fA-F_]+", TokenKind::Number),
        (
            r"^([0-9][0-9_]*(\.[0-9_]*)?|\.[0-9]+)([eE][+-]?[0-9]+)?[jJ]?",
            TokenKind::Number,
        ),
        (r"^[-+*/%&|^~<>=!@]+", TokenKind::Operator),
        (PUNCTUATION, TokenKind::Punctuation),
        (r"^[\p{L}_][\p{L}\p{N}_]*", TokenKind::Name),
    ])
    .keywords(&[
        "and", "as", "assert", "async", "await", "break", "class", "continue", "def", "del",
        "elif", "else", "except", "finally", "for", "from", "global", "if", "import", "in", "is",
        "lambda", "match", "nonlocal", "not", "or", "pass", "raise", "return", "try", "while",
        "with", "yield",
    ])
    .constants(&["True", "False", "None"])
    .builtins(&[
        "abs", "all", "any", "bool", "dict", "enumerate", "filter", "float", "int", "isinstance",
        "len", "list", "map", "max", "min", "open", "print", "range", "reversed", "set",
        "sorted", "str", "sum", "super", "tuple", "type", "zip", "self",
    ])
});

static JAVASCRIPT: Lazy<LexerRules> = Lazy::new(|| {
    LexerRules::new(&[
        (r"^//.*", TokenKind::Comment),
        (r"^/\*(?s:.)*?\*/", TokenKind::Comment),
        (r"^/\*(?s:.)*", TokenKind::Comment),
        (r"^\s+", TokenKind::Whitespace),
        (r#"^"([^"\\\n]|\\.)*"?"#, TokenKind::String),
        (r"^'([^'\\\n]|\\.)*'?", TokenKind::String),
        (r"^`([^`\\]|\\.)*`?", TokenKind::String),
        (r"^0[xXoObB][0-9a-fA-F_]+n?", TokenKind::Number),
        (
            r"^([0-9][0-9_]*(\.[0-9_]*)?|\.[0-9]+)([eE][+-]?[0-9]+)?n?",
            TokenKind::Number,
        ),
        (r"^[-+*/%&|^~<>=!?]+", TokenKind::Operator),
        (PUNCTUATION, TokenKind::Punctuation),
        (r"^[\p{L}_$][\p{L}\p{N}_$]*", TokenKind::Name),
    ])
    .keywords(&[
        "async", "await", "break", "case", "catch", "class", "const", "continue", "debugger",
        "default", "delete", "do", "else", "export", "extends", "finally", "for", "function",
        "if", "import", "in", "instanceof", "let", "new", "of", "return", "static", "super",
        "switch", "this", "throw", "try", "typeof", "var", "void", "while", "with", "yield",
    ])
    .constants(&["true", "false", "null", "undefined", "NaN", "Infinity"])
    .builtins(&[
        "Array", "Boolean", "Date", "Error", "JSON", "Map", "Math", "Number", "Object",
        "Promise", "RegExp", "Set", "String", "Symbol", "console", "document", "window",
    ])
});

static BASH: Lazy<LexerRules> = Lazy::new(|| {
    LexerRules::new(&[
        (r"^\s+", TokenKind::Whitespace),
        // Variables before comments so `$#` is not a comment
        (r"^\$\{[^}\n]*\}", TokenKind::Variable),
        (r"^\$[A-Za-z_][A-Za-z0-9_]*", TokenKind::Variable),
        (r"^\$[0-9#?$!@*-]", TokenKind::Variable),
        (r"^#.*", TokenKind::Comment),
        (r#"^"([^"\\]|\\.)*"?"#, TokenKind::String),
        (r"^'[^']*'?", TokenKind::String),
        (r"^[0-9]+", TokenKind::Number),
        (r"^[-+*/%=<>!&|]+", TokenKind::Operator),
        (PUNCTUATION, TokenKind::Punctuation),
        (r"^[A-Za-z_][A-Za-z0-9_]*", TokenKind::Name),
    ])
    .keywords(&[
        "if", "then", "else", "elif", "fi", "for", "while", "until", "do", "done", "case",
        "esac", "in", "function", "select", "return", "break", "continue",
    ])
    .builtins(&[
        "alias", "cd", "echo", "eval", "exec", "exit", "export", "local", "printf", "pwd",
        "read", "set", "shift", "source", "test", "trap", "unset",
    ])
});

static SCHEME: Lazy<LexerRules> = Lazy::new(|| {
    LexerRules::new(&[
        (r"^;.*", TokenKind::Comment),
        (r"^#\|(?s:.)*?\|#", TokenKind::Comment),
        (r"^\s+", TokenKind::Whitespace),
        (r#"^"([^"\\]|\\.)*"?"#, TokenKind::String),
        (r"^#\\(space|newline|tab|.)", TokenKind::String),
        (r"^#(true|false|t|f)\b", TokenKind::Constant),
        (r"^[-+]?([0-9]+(\.[0-9]*)?|\.[0-9]+)([eE][+-]?[0-9]+)?", TokenKind::Number),
        (r"^([()\[\]{}.:']|,@|,|`)", TokenKind::Punctuation),
        // Scheme identifiers may contain most symbols, but never `:` or braces
        (
            r"^[\p{L}!$%&*/<=>?^_~+\-][\p{L}\p{N}!$%&*/<=>?^_~+\-.@]*",
            TokenKind::Name,
        ),
    ])
    .keywords(&[
        "and", "begin", "case", "cond", "define", "define-syntax", "delay", "do", "else", "if",
        "lambda", "let", "let*", "letrec", "or", "quasiquote", "quote", "set!", "syntax-rules",
        "unless", "unquote", "when",
    ])
    .builtins(&[
        "append", "apply", "car", "cdr", "cons", "display", "eq?", "equal?", "for-each",
        "length", "list", "map", "newline", "not", "null?", "pair?", "reverse", "vector",
    ])
});

static JAVA: Lazy<LexerRules> = Lazy::new(|| {
    LexerRules::new(&[
        (r"^//.*", TokenKind::Comment),
        (r"^/\*(?s:.)*?\*/", TokenKind::Comment),
        (r"^/\*(?s:.)*", TokenKind::Comment),
        (r"^\s+", TokenKind::Whitespace),
        (r#"^"""(?s:.)*?""""#, TokenKind::String),
        (r#"^"([^"\\\n]|\\.)*"?"#, TokenKind::String),
        (r"^'([^'\\\n]|\\.)*'?", TokenKind::String),
        (r"^@[\p{L}_][\p{L}\p{N}_]*", TokenKind::Builtin),
        (r"^0[xXbB][0-9a-fA-F_]+[lL]?", TokenKind::Number),
        (
            r"^([0-9][0-9_]*(\.[0-9_]*)?|\.[0-9]+)([eE][+-]?[0-9]+)?[lLfFdD]?",
            TokenKind::Number,
        ),
        (r"^[-+*/%&|^~<>=!?]+", TokenKind::Operator),
        (PUNCTUATION, TokenKind::Punctuation),
        (r"^[\p{L}_$][\p{L}\p{N}_$]*", TokenKind::Name),
    ])
    .keywords(&[
        "abstract", "assert", "break", "case", "catch", "class", "continue", "default", "do",
        "else", "enum", "extends", "final", "finally", "for", "if", "implements", "import",
        "instanceof", "interface", "native", "new", "package", "private", "protected", "public",
        "record", "return", "static", "super", "switch", "synchronized", "this", "throw",
        "throws", "transient", "try", "var", "volatile", "while", "yield",
    ])
    .constants(&["true", "false", "null"])
    .types(&[
        "boolean", "byte", "char", "double", "float", "int", "long", "short", "void",
    ])
    .builtins(&["String", "Object", "System", "Integer", "List", "Map"])
});

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::lexer::tokenize;

    fn kinds_and_text<'a>(input: &'a str, language: Language) -> Vec<(TokenKind, &'a str)> {
        let rules = for_language(language).unwrap();
        tokenize(input, rules)
            .into_iter()
            .filter(|t| t.kind != TokenKind::Whitespace)
            .map(|t| (t.kind, &input[t.start..t.end]))
            .collect()
    }

    #[test]
    fn test_python_statement() {
        assert_eq!(
            kinds_and_text("def f(x): return None", Language::Python),
            vec![
                (TokenKind::Keyword, "def"),
                (TokenKind::Name, "f"),
                (TokenKind::Punctuation, "("),
                (TokenKind::Name, "x"),
                (TokenKind::Punctuation, ")"),
                (TokenKind::Punctuation, ":"),
                (TokenKind::Keyword, "return"),
                (TokenKind::Constant, "None"),
            ]
        );
    }

    #[test]
    fn test_python_triple_quoted_string() {
        let tokens = kinds_and_text("'''a\nb'''", Language::Python);
        assert_eq!(tokens, vec![(TokenKind::String, "'''a\nb'''")]);
    }

    #[test]
    fn test_cloze_pieces_lex_the_same_everywhere() {
        for language in [
            Language::Python,
            Language::JavaScript,
            Language::Bash,
            Language::Scheme,
            Language::Java,
        ] {
            let tokens = kinds_and_text("{{c1::x}}", language);
            assert_eq!(
                tokens,
                vec![
                    (TokenKind::Punctuation, "{"),
                    (TokenKind::Punctuation, "{"),
                    (TokenKind::Name, "c1"),
                    (TokenKind::Punctuation, ":"),
                    (TokenKind::Punctuation, ":"),
                    (TokenKind::Name, "x"),
                    (TokenKind::Punctuation, "}"),
                    (TokenKind::Punctuation, "}"),
                ],
                "Failed for: {}",
                language
            );
        }
    }

    #[test]
    fn test_javascript_comment_and_template() {
        let tokens = kinds_and_text("// hi\n`a${b}`", Language::JavaScript);
        assert_eq!(
            tokens,
            vec![(TokenKind::Comment, "// hi"), (TokenKind::String, "`a${b}`")]
        );
    }

    #[test]
    fn test_bash_variable_not_comment() {
        let tokens = kinds_and_text("echo $# # done", Language::Bash);
        assert_eq!(
            tokens,
            vec![
                (TokenKind::Builtin, "echo"),
                (TokenKind::Variable, "$#"),
                (TokenKind::Comment, "# done"),
            ]
        );
    }

    #[test]
    fn test_scheme_symbols() {
        let tokens = kinds_and_text("(define (null? x) #t)", Language::Scheme);
        assert_eq!(
            tokens,
            vec![
                (TokenKind::Punctuation, "("),
                (TokenKind::Keyword, "define"),
                (TokenKind::Punctuation, "("),
                (TokenKind::Builtin, "null?"),
                (TokenKind::Name, "x"),
                (TokenKind::Punctuation, ")"),
                (TokenKind::Constant, "#t"),
                (TokenKind::Punctuation, ")"),
            ]
        );
    }

    #[test]
    fn test_java_annotation_and_types() {
        let tokens = kinds_and_text("@Override int x = 1L;", Language::Java);
        assert_eq!(
            tokens,
            vec![
                (TokenKind::Builtin, "@Override"),
                (TokenKind::Type, "int"),
                (TokenKind::Name, "x"),
                (TokenKind::Operator, "="),
                (TokenKind::Number, "1L"),
                (TokenKind::Punctuation, ";"),
            ]
        );
    }

    #[test]
    fn test_html_has_no_table() {
        assert!(for_language(Language::Html).is_none());
    }
}
