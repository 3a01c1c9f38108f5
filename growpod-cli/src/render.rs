//! Terminal rendering for GrowPod types using owo_colors.

use growpod_core::calendar::TaskDescriptor;
use growpod_core::session::{CachedUser, SocialUser};
use growpod_core::views::NameDirectory;
use growpod_core::{Garden, Plant, Task, User};
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Garden {
    fn render(&self) -> String {
        let mut lines = vec![format!("{} {}", self.name.bold(), format!("#{}", self.id).dimmed())];
        if !self.description.is_empty() {
            lines.push(format!("   {}", self.description));
        }
        if !self.zip_code.is_empty() {
            lines.push(format!("   {}", format!("zip {}", self.zip_code).dimmed()));
        }
        lines.join("\n")
    }
}

impl Render for User {
    fn render(&self) -> String {
        let mut lines = vec![
            format!("{} {}", self.preferred_name.bold(), format!("#{}", self.id).dimmed()),
            format!("   {}", self.email),
        ];
        if !self.zip_code.is_empty() {
            lines.push(format!("   {}", format!("zip {}", self.zip_code).dimmed()));
        }
        if !self.biography.is_empty() {
            lines.push(format!("   {}", self.biography));
        }
        lines.join("\n")
    }
}

impl Render for Plant {
    fn render(&self) -> String {
        format!(
            "{} x{} {}",
            self.nickname,
            self.count,
            format!("#{}", self.id).dimmed()
        )
    }
}

impl Render for Task {
    fn render(&self) -> String {
        let mut lines = vec![format!("{} {}", self.time.cyan(), self.title.bold())];
        if !self.participants.is_empty() {
            lines.push(format!("   Member(s): {}", self.participants.join(",")));
        }
        if !self.description.is_empty() {
            lines.push(format!("   {}", self.description.dimmed()));
        }
        lines.join("\n")
    }
}

impl Render for TaskDescriptor {
    fn render(&self) -> String {
        let mut lines = vec![
            format!("{} | {}", self.time.cyan(), self.title.bold()),
            format!("   {}", self.members_line()),
        ];
        if let Some(description) = &self.description {
            lines.push(format!("   {}", description.dimmed()));
        }
        lines.join("\n")
    }
}

impl Render for SocialUser {
    fn render(&self) -> String {
        format!("{} <{}>", self.name.bold(), self.email)
    }
}

impl Render for CachedUser {
    fn render(&self) -> String {
        format!("{} {}", self.email, format!("#{}", self.id).dimmed())
    }
}

/// A garden line followed by its admin's display name.
pub fn garden_with_admin(garden: &Garden, names: &NameDirectory) -> String {
    let admin = names.get(&garden.admin_id).unwrap_or(garden.admin_id.as_str());
    format!("{}\n   {}", garden.render(), format!("Admin: {admin}").dimmed())
}

/// Page-level error, printed in red.
pub fn error_line(message: &str) -> String {
    format!("   {}", message.red())
}

/// Dimmed placeholder for empty lists.
pub fn empty_line(message: &str) -> String {
    format!("   {}", message.dimmed())
}
