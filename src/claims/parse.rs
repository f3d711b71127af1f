//! SentenceParse - Dependency Tree Arena
//!
//! One sentence as produced by the external annotation service: tokens in
//! surface order, each pointing at its syntactic head by index.
//!
//! # Design
//! - Heads are plain indices into the token vector (no owning pointers)
//! - The tree is validated once on construction: heads in range, no cycles,
//!   exactly one root
//! - Children lists are precomputed so `lefts`/`rights`/`subtree` are cheap
//!
//! ```text
//!   Vaccines  weaken  immunity  and  cause  autism  .
//!      │        ▲        │       │     │      │     │
//!      └─nsubj──┤──dobj──┘──cc───┘     │      │     │
//!               ├────────conj──────────┘◄dobj─┘     │
//!               └────────punct──────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

// =============================================================================
// Core Types
// =============================================================================

/// Universal POS tag (coarse part of speech)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PosTag {
    Adj,
    Adp,
    Adv,
    Aux,
    Cconj,
    Det,
    Intj,
    Noun,
    Num,
    Part,
    Pron,
    Propn,
    Punct,
    Sconj,
    Sym,
    Verb,
    Space,
    /// Unknown or unassigned tag
    X,
}

impl PosTag {
    /// Map a tag string to a PosTag. Case-insensitive; unknown tags become `X`.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_uppercase().as_str() {
            "ADJ" => PosTag::Adj,
            "ADP" => PosTag::Adp,
            "ADV" => PosTag::Adv,
            "AUX" => PosTag::Aux,
            "CCONJ" | "CONJ" => PosTag::Cconj,
            "DET" => PosTag::Det,
            "INTJ" => PosTag::Intj,
            "NOUN" => PosTag::Noun,
            "NUM" => PosTag::Num,
            "PART" => PosTag::Part,
            "PRON" => PosTag::Pron,
            "PROPN" => PosTag::Propn,
            "PUNCT" => PosTag::Punct,
            "SCONJ" => PosTag::Sconj,
            "SYM" => PosTag::Sym,
            "VERB" => PosTag::Verb,
            "SPACE" => PosTag::Space,
            _ => PosTag::X,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PosTag::Adj => "ADJ",
            PosTag::Adp => "ADP",
            PosTag::Adv => "ADV",
            PosTag::Aux => "AUX",
            PosTag::Cconj => "CCONJ",
            PosTag::Det => "DET",
            PosTag::Intj => "INTJ",
            PosTag::Noun => "NOUN",
            PosTag::Num => "NUM",
            PosTag::Part => "PART",
            PosTag::Pron => "PRON",
            PosTag::Propn => "PROPN",
            PosTag::Punct => "PUNCT",
            PosTag::Sconj => "SCONJ",
            PosTag::Sym => "SYM",
            PosTag::Verb => "VERB",
            PosTag::Space => "SPACE",
            PosTag::X => "X",
        }
    }
}

/// A word occurrence with its annotation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Surface text, exactly as written
    pub text: String,
    /// Base form
    pub lemma: String,
    /// Coarse part of speech
    pub pos: PosTag,
    /// Dependency relation to the head (`nsubj`, `dobj`, `conj`, `ROOT`, ...)
    pub dep: String,
    /// Sentence-relative index of the head token, `None` for the root
    pub head: Option<usize>,
}

impl Token {
    pub fn new(
        text: impl Into<String>,
        lemma: impl Into<String>,
        pos: PosTag,
        dep: impl Into<String>,
        head: Option<usize>,
    ) -> Self {
        Self {
            text: text.into(),
            lemma: lemma.into(),
            pos,
            dep: dep.into(),
            head,
        }
    }

    pub fn is_root(&self) -> bool {
        self.head.is_none()
    }
}

/// Structural problems in a parse handed over by the annotation service
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    HeadOutOfRange { token: usize, head: usize, len: usize },
    Cycle { token: usize },
    RootCount { found: usize },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::HeadOutOfRange { token, head, len } => write!(
                f,
                "Token {} points at head {} outside a sentence of {} tokens",
                token, head, len
            ),
            ParseError::Cycle { token } => write!(f, "Head cycle through token {}", token),
            ParseError::RootCount { found } => {
                write!(f, "Expected exactly one root token, found {}", found)
            }
        }
    }
}

impl std::error::Error for ParseError {}

// =============================================================================
// SentenceParse
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Walk {
    Unvisited,
    OnPath,
    Settled,
}

/// A validated dependency tree for one sentence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentenceParse {
    text: String,
    tokens: Vec<Token>,
    children: Vec<Vec<usize>>,
    root: usize,
}

impl SentenceParse {
    /// Build a parse whose text is the token texts joined by single spaces
    pub fn new(tokens: Vec<Token>) -> Result<Self, ParseError> {
        let text = tokens
            .iter()
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        Self::with_text(text, tokens)
    }

    /// Build a parse that keeps the original sentence text
    pub fn with_text(text: impl Into<String>, tokens: Vec<Token>) -> Result<Self, ParseError> {
        let len = tokens.len();

        let mut root = None;
        let mut roots = 0;
        for (i, token) in tokens.iter().enumerate() {
            match token.head {
                None => {
                    roots += 1;
                    root = Some(i);
                }
                Some(head) if head >= len => {
                    return Err(ParseError::HeadOutOfRange { token: i, head, len });
                }
                Some(_) => {}
            }
        }

        let root = match (root, roots) {
            (Some(r), 1) => r,
            _ => return Err(ParseError::RootCount { found: roots }),
        };

        // Each token is walked at most once: a walk stops at the root or at a
        // token already known to reach it, and hitting its own path is a cycle.
        let mut state = vec![Walk::Unvisited; len];
        let mut path = Vec::new();
        for start in 0..len {
            let mut current = start;
            loop {
                match state[current] {
                    Walk::Settled => break,
                    Walk::OnPath => return Err(ParseError::Cycle { token: start }),
                    Walk::Unvisited => {}
                }
                state[current] = Walk::OnPath;
                path.push(current);
                match tokens[current].head {
                    Some(head) => current = head,
                    None => break,
                }
            }
            for token in path.drain(..) {
                state[token] = Walk::Settled;
            }
        }

        let mut children = vec![Vec::new(); len];
        for (i, token) in tokens.iter().enumerate() {
            if let Some(head) = token.head {
                children[head].push(i);
            }
        }

        Ok(Self {
            text: text.into(),
            tokens,
            children,
            root,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn token(&self, index: usize) -> &Token {
        &self.tokens[index]
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Index of the root token
    pub fn root(&self) -> usize {
        self.root
    }

    /// Immediate dependents of a token, in surface order
    pub fn children(&self, index: usize) -> &[usize] {
        &self.children[index]
    }

    /// Immediate dependents to the left of the token
    pub fn lefts(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        self.children[index].iter().copied().filter(move |&c| c < index)
    }

    /// Immediate dependents to the right of the token
    pub fn rights(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        self.children[index].iter().copied().filter(move |&c| c > index)
    }

    /// The token and all of its descendants, in surface order
    pub fn subtree(&self, index: usize) -> Vec<usize> {
        let mut nodes = Vec::new();
        let mut stack = vec![index];
        while let Some(node) = stack.pop() {
            nodes.push(node);
            stack.extend(self.children[node].iter().copied());
        }
        nodes.sort_unstable();
        nodes
    }

    /// Surface text of a subtree, one space between tokens
    pub fn span_text(&self, index: usize) -> String {
        self.subtree(index)
            .into_iter()
            .map(|i| self.tokens[i].text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

// =============================================================================
// Tests
// =============================================================================
