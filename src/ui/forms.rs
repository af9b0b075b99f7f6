use anyhow::{anyhow, Result};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

/// Internal representation of the "add book" form fields.
#[derive(Default, Clone)]
pub(crate) struct BookForm {
    pub(crate) title: String,
    pub(crate) author: String,
    pub(crate) isbn: String,
    pub(crate) year: String,
    pub(crate) active: BookField,
    pub(crate) error: Option<String>,
}

/// Fields available within the book form.
#[derive(Copy, Clone, PartialEq, Eq, Default)]
pub(crate) enum BookField {
    #[default]
    Title,
    Author,
    Isbn,
    Year,
}

impl BookForm {
    /// Cycle focus across the four fields.
    pub(crate) fn toggle_field(&mut self) {
        self.active = match self.active {
            BookField::Title => BookField::Author,
            BookField::Author => BookField::Isbn,
            BookField::Isbn => BookField::Year,
            BookField::Year => BookField::Title,
        };
    }

    /// Append a character to the active field. The year intentionally takes
    /// free-form text, matching the data already in circulation.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        match self.active {
            BookField::Title => self.title.push(ch),
            BookField::Author => self.author.push(ch),
            BookField::Isbn => self.isbn.push(ch),
            BookField::Year => self.year.push(ch),
        }
        true
    }

    /// Remove the last character from the active field.
    pub(crate) fn backspace(&mut self) {
        match self.active {
            BookField::Title => {
                self.title.pop();
            }
            BookField::Author => {
                self.author.pop();
            }
            BookField::Isbn => {
                self.isbn.pop();
            }
            BookField::Year => {
                self.year.pop();
            }
        }
    }

    /// Validate the inputs and return trimmed values ready for the catalog.
    pub(crate) fn parse_inputs(&self) -> Result<(String, String, String, String)> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(anyhow!("Title is required."));
        }
        let author = self.author.trim();
        if author.is_empty() {
            return Err(anyhow!("Author is required."));
        }
        let isbn = self.isbn.trim();
        if isbn.is_empty() {
            return Err(anyhow!("ISBN is required."));
        }
        Ok((
            title.to_string(),
            author.to_string(),
            isbn.to_string(),
            self.year.trim().to_string(),
        ))
    }

    /// Render a single line for the form widget.
    pub(crate) fn build_line(&self, field_name: &str, field: BookField) -> Line<'static> {
        let (value, is_active) = match field {
            BookField::Title => (&self.title, self.active == BookField::Title),
            BookField::Author => (&self.author, self.active == BookField::Author),
            BookField::Isbn => (&self.isbn, self.active == BookField::Isbn),
            BookField::Year => (&self.year, self.active == BookField::Year),
        };

        let placeholder = match field {
            BookField::Year => "<optional>",
            _ => "<required>",
        };

        build_field_line(field_name, value, placeholder, is_active)
    }

    /// Return the character count for the requested field.
    pub(crate) fn value_len(&self, field: BookField) -> usize {
        match field {
            BookField::Title => self.title.chars().count(),
            BookField::Author => self.author.chars().count(),
            BookField::Isbn => self.isbn.chars().count(),
            BookField::Year => self.year.chars().count(),
        }
    }
}

/// Form state for member registration.
#[derive(Default, Clone)]
pub(crate) struct MemberForm {
    pub(crate) name: String,
    pub(crate) member_id: String,
    pub(crate) active: MemberField,
    pub(crate) error: Option<String>,
}

/// Fields within the member form.
#[derive(Copy, Clone, PartialEq, Eq, Default)]
pub(crate) enum MemberField {
    #[default]
    Name,
    MemberId,
}

impl MemberForm {
    /// Swap focus between the name and id fields.
    pub(crate) fn toggle_field(&mut self) {
        self.active = match self.active {
            MemberField::Name => MemberField::MemberId,
            MemberField::MemberId => MemberField::Name,
        };
    }

    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        match self.active {
            MemberField::Name => self.name.push(ch),
            MemberField::MemberId => self.member_id.push(ch),
        }
        true
    }

    pub(crate) fn backspace(&mut self) {
        match self.active {
            MemberField::Name => {
                self.name.pop();
            }
            MemberField::MemberId => {
                self.member_id.pop();
            }
        }
    }

    /// Validate the inputs and return trimmed values for registration.
    pub(crate) fn parse_inputs(&self) -> Result<(String, String)> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(anyhow!("Member name is required."));
        }
        let member_id = self.member_id.trim();
        if member_id.is_empty() {
            return Err(anyhow!("Member ID is required."));
        }
        Ok((name.to_string(), member_id.to_string()))
    }

    pub(crate) fn build_line(&self, field_name: &str, field: MemberField) -> Line<'static> {
        let (value, is_active) = match field {
            MemberField::Name => (&self.name, self.active == MemberField::Name),
            MemberField::MemberId => (&self.member_id, self.active == MemberField::MemberId),
        };
        build_field_line(field_name, value, "<required>", is_active)
    }

    pub(crate) fn value_len(&self, field: MemberField) -> usize {
        match field {
            MemberField::Name => self.name.chars().count(),
            MemberField::MemberId => self.member_id.chars().count(),
        }
    }
}

/// Shared form for the borrow and return dialogs: both transactions take a
/// member id and an ISBN. The surrounding mode decides which core call runs
/// on submit.
#[derive(Default, Clone)]
pub(crate) struct LoanForm {
    pub(crate) member_id: String,
    pub(crate) isbn: String,
    pub(crate) active: LoanField,
    pub(crate) error: Option<String>,
}

/// Fields within the loan form.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub(crate) enum LoanField {
    #[default]
    MemberId,
    Isbn,
}

impl LoanForm {
    /// Prefill the ISBN from the selected catalog row and focus the member
    /// field, which is the one still missing.
    pub(crate) fn with_isbn(isbn: &str) -> Self {
        Self {
            isbn: isbn.to_string(),
            ..Self::default()
        }
    }

    /// Prefill the member id from the selected member row and focus the ISBN
    /// field.
    pub(crate) fn with_member(member_id: &str) -> Self {
        Self {
            member_id: member_id.to_string(),
            active: LoanField::Isbn,
            ..Self::default()
        }
    }

    pub(crate) fn toggle_field(&mut self) {
        self.active = match self.active {
            LoanField::MemberId => LoanField::Isbn,
            LoanField::Isbn => LoanField::MemberId,
        };
    }

    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        match self.active {
            LoanField::MemberId => self.member_id.push(ch),
            LoanField::Isbn => self.isbn.push(ch),
        }
        true
    }

    pub(crate) fn backspace(&mut self) {
        match self.active {
            LoanField::MemberId => {
                self.member_id.pop();
            }
            LoanField::Isbn => {
                self.isbn.pop();
            }
        }
    }

    /// Validate the inputs and return trimmed values for the transaction.
    pub(crate) fn parse_inputs(&self) -> Result<(String, String)> {
        let member_id = self.member_id.trim();
        if member_id.is_empty() {
            return Err(anyhow!("Member ID is required."));
        }
        let isbn = self.isbn.trim();
        if isbn.is_empty() {
            return Err(anyhow!("ISBN is required."));
        }
        Ok((member_id.to_string(), isbn.to_string()))
    }

    pub(crate) fn build_line(&self, field_name: &str, field: LoanField) -> Line<'static> {
        let (value, is_active) = match field {
            LoanField::MemberId => (&self.member_id, self.active == LoanField::MemberId),
            LoanField::Isbn => (&self.isbn, self.active == LoanField::Isbn),
        };
        build_field_line(field_name, value, "<required>", is_active)
    }

    pub(crate) fn value_len(&self, field: LoanField) -> usize {
        match field {
            LoanField::MemberId => self.member_id.chars().count(),
            LoanField::Isbn => self.isbn.chars().count(),
        }
    }
}

/// Render one `Name: value` line with the shared focus/placeholder styling.
fn build_field_line(
    field_name: &str,
    value: &str,
    placeholder: &str,
    is_active: bool,
) -> Line<'static> {
    let display = if value.is_empty() {
        placeholder.to_string()
    } else {
        value.to_string()
    };

    let style = if is_active {
        Style::default().fg(Color::Yellow)
    } else if value.is_empty() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };

    Line::from(vec![
        Span::raw(format!("{field_name}: ")),
        Span::styled(display, style),
    ])
}

#[cfg(test)]
mod tests {
    use super::{BookForm, LoanForm, MemberForm};

    #[test]
    fn book_form_trims_and_requires_title_author_isbn() {
        let form = BookForm {
            title: "  Rust in Practice  ".to_string(),
            author: "John Smith".to_string(),
            isbn: "111".to_string(),
            year: "".to_string(),
            ..BookForm::default()
        };
        let (title, author, isbn, year) = form.parse_inputs().unwrap();
        assert_eq!(title, "Rust in Practice");
        assert_eq!(author, "John Smith");
        assert_eq!(isbn, "111");
        assert_eq!(year, "");

        let missing_isbn = BookForm {
            title: "x".to_string(),
            author: "y".to_string(),
            ..BookForm::default()
        };
        assert!(missing_isbn.parse_inputs().is_err());
    }

    #[test]
    fn book_form_accepts_free_form_year() {
        let form = BookForm {
            title: "x".to_string(),
            author: "y".to_string(),
            isbn: "1".to_string(),
            year: "circa 1850".to_string(),
            ..BookForm::default()
        };
        let (_, _, _, year) = form.parse_inputs().unwrap();
        assert_eq!(year, "circa 1850");
    }

    #[test]
    fn member_form_requires_both_fields() {
        let form = MemberForm {
            name: "Alice".to_string(),
            member_id: "".to_string(),
            ..MemberForm::default()
        };
        assert!(form.parse_inputs().is_err());
    }

    #[test]
    fn loan_form_prefill_focuses_the_missing_field() {
        use super::LoanField;

        let from_catalog = LoanForm::with_isbn("111");
        assert_eq!(from_catalog.isbn, "111");
        assert_eq!(from_catalog.active, LoanField::MemberId);

        let from_members = LoanForm::with_member("M1");
        assert_eq!(from_members.member_id, "M1");
        assert_eq!(from_members.active, LoanField::Isbn);
    }
}
