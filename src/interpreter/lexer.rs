//! Lexer (tokenizer) for sketch source text.
//!
//! The lexer knows nothing about C++: it splits text into words, integers,
//! the punctuation that pin-write calls use, and opaque symbols. It never
//! fails; every character ends up in some token.

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The kind of token
    pub kind: TokenKind,
    /// The token's text
    pub text: String,
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
}

/// Token types in sketch source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Letters, digits and underscores, not all digits
    Word,
    /// Decimal digits only
    Integer,
    /// Open parenthesis '('
    OpenParen,
    /// Close parenthesis ')'
    CloseParen,
    /// Comma ','
    Comma,
    /// Any other visible character
    Symbol,
    /// Newline
    Newline,
    /// End of file
    Eof,
}

/// Lexer for tokenizing sketch source.
pub struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input.
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            line: 1,
            column: 1,
        }
    }

    /// Get the next token.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let start_line = self.line;
        let start_column = self.column;
        let token = |kind: TokenKind, text: String| Token {
            kind,
            text,
            line: start_line,
            column: start_column,
        };

        let Some(&ch) = self.chars.peek() else {
            return token(TokenKind::Eof, String::new());
        };

        match ch {
            '\n' => {
                self.advance();
                token(TokenKind::Newline, "\n".to_string())
            }
            '(' => {
                self.advance();
                token(TokenKind::OpenParen, "(".to_string())
            }
            ')' => {
                self.advance();
                token(TokenKind::CloseParen, ")".to_string())
            }
            ',' => {
                self.advance();
                token(TokenKind::Comma, ",".to_string())
            }
            _ if is_word_char(ch) => {
                let text = self.read_word();
                let kind = if text.chars().all(|c| c.is_ascii_digit()) {
                    TokenKind::Integer
                } else {
                    TokenKind::Word
                };
                token(kind, text)
            }
            _ => {
                self.advance();
                token(TokenKind::Symbol, ch.to_string())
            }
        }
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.chars.next()?;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while let Some(&ch) = self.chars.peek() {
            if ch != '\n' && ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_word(&mut self) -> String {
        let mut text = String::new();
        while let Some(&ch) = self.chars.peek() {
            if is_word_char(ch) {
                text.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        text
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let token = self.next_token();
        (token.kind != TokenKind::Eof).then_some(token)
    }
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        Lexer::new(input).map(|t| t.kind).collect()
    }

    #[test]
    fn test_lexer_call() {
        use TokenKind::*;
        assert_eq!(
            kinds("digitalWrite(D13, HIGH);"),
            vec![Word, OpenParen, Word, Comma, Word, CloseParen, Symbol]
        );
    }

    #[test]
    fn test_lexer_integers_and_words() {
        let tokens: Vec<_> = Lexer::new("analogWrite(9, 200) 10k").collect();
        assert_eq!(tokens[2].kind, TokenKind::Integer);
        assert_eq!(tokens[2].text, "9");
        assert_eq!(tokens[4].text, "200");
        assert_eq!(tokens[6].kind, TokenKind::Word);
        assert_eq!(tokens[6].text, "10k");
    }

    #[test]
    fn test_lexer_positions() {
        let tokens: Vec<_> = Lexer::new("void loop() {\n  digitalWrite(D2,LOW);\n}").collect();
        let call = tokens.iter().find(|t| t.text == "digitalWrite").unwrap();
        assert_eq!((call.line, call.column), (2, 3));
        assert_eq!(tokens.iter().filter(|t| t.kind == TokenKind::Newline).count(), 2);
        assert_eq!(tokens.last().unwrap().line, 3);
    }
}
