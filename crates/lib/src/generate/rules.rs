//! Structured rule file builder.
//!
//! Content is assembled as an ordered list of [`Entry`] records and turned
//! into text by a single [`RuleFile::render`] pass. Rendering is a pure
//! function of the entries, which keeps identical inputs byte-identical on disk.
//!
//! # Rule Layout
//!
//! ```text
//! # dependencies for app
//! app.dir/app.depends: \
//!   app.dir/a.c.o.depends \
//!   app.dir/app.make
//! 	@touch app.dir/app.depends
//! ```

use std::fmt::Write;

/// One named rule: target, prerequisites and command lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
  pub comment: Option<String>,
  pub target: String,
  pub depends: Vec<String>,
  pub commands: Vec<String>,
}

impl Rule {
  pub fn new(target: impl Into<String>) -> Self {
    Self {
      comment: None,
      target: target.into(),
      depends: Vec::new(),
      commands: Vec::new(),
    }
  }

  pub fn comment(mut self, comment: impl Into<String>) -> Self {
    self.comment = Some(comment.into());
    self
  }

  pub fn depend(mut self, dep: impl Into<String>) -> Self {
    self.depends.push(dep.into());
    self
  }

  pub fn depends<I, S>(mut self, deps: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.depends.extend(deps.into_iter().map(Into::into));
    self
  }

  pub fn command(mut self, cmd: impl Into<String>) -> Self {
    self.commands.push(cmd.into());
    self
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
  /// `# text`, one line per line of `text`.
  Comment(String),
  /// Empty line.
  Blank,
  /// Verbatim line.
  Raw(String),
  /// `NAME = value`
  Variable { name: String, value: String },
  /// `<include-directive> path`
  Include(String),
  Rule(Rule),
}

/// Ordered content of one generated file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleFile {
  entries: Vec<Entry>,
}

impl RuleFile {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn comment(&mut self, text: impl Into<String>) -> &mut Self {
    self.entries.push(Entry::Comment(text.into()));
    self
  }

  pub fn blank(&mut self) -> &mut Self {
    self.entries.push(Entry::Blank);
    self
  }

  pub fn raw(&mut self, line: impl Into<String>) -> &mut Self {
    self.entries.push(Entry::Raw(line.into()));
    self
  }

  pub fn variable(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
    self.entries.push(Entry::Variable {
      name: name.into(),
      value: value.into(),
    });
    self
  }

  pub fn include(&mut self, path: impl Into<String>) -> &mut Self {
    self.entries.push(Entry::Include(path.into()));
    self
  }

  pub fn rule(&mut self, rule: Rule) -> &mut Self {
    self.entries.push(Entry::Rule(rule));
    self
  }

  /// Rules in the order they will appear in the rendered text.
  pub fn rules(&self) -> impl Iterator<Item = &Rule> {
    self.entries.iter().filter_map(|e| match e {
      Entry::Rule(rule) => Some(rule),
      _ => None,
    })
  }

  /// Render the file using `include_directive` as the include keyword.
  pub fn render(&self, include_directive: &str) -> String {
    let mut out = String::new();
    for entry in &self.entries {
      match entry {
        Entry::Comment(text) => {
          for line in text.lines() {
            push_comment_line(&mut out, line);
          }
        }
        Entry::Blank => out.push('\n'),
        Entry::Raw(line) => {
          out.push_str(line);
          out.push('\n');
        }
        Entry::Variable { name, value } => {
          let _ = writeln!(out, "{name} = {value}");
        }
        Entry::Include(path) => {
          let _ = writeln!(out, "{include_directive} {path}");
        }
        Entry::Rule(rule) => render_rule(&mut out, rule),
      }
    }
    out
  }
}

fn push_comment_line(out: &mut String, line: &str) {
  if line.is_empty() {
    out.push_str("#\n");
  } else {
    let _ = writeln!(out, "# {line}");
  }
}

fn render_rule(out: &mut String, rule: &Rule) {
  if let Some(comment) = &rule.comment {
    for line in comment.lines() {
      push_comment_line(out, line);
    }
  }

  out.push_str(&rule.target);
  out.push(':');
  match rule.depends.as_slice() {
    [] => {}
    [single] => {
      out.push(' ');
      out.push_str(single);
    }
    many => {
      for dep in many {
        out.push_str(" \\\n  ");
        out.push_str(dep);
      }
    }
  }
  out.push('\n');

  for cmd in &rule.commands {
    out.push('\t');
    out.push_str(cmd);
    out.push('\n');
  }
  out.push('\n');
}
