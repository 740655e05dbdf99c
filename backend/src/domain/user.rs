//! User data model.
//!
//! Every field of a user record is a validated newtype. Constructors reject
//! invalid input, so a [`UserDraft`] or [`User`] that exists is always valid
//! and the registry never re-checks field contents.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Validation errors returned by the user field constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// A name was empty or only whitespace.
    EmptyName,
    /// A name had fewer characters than allowed.
    NameTooShort {
        /// Minimum accepted length.
        min: usize,
    },
    /// A name had more characters than allowed.
    NameTooLong {
        /// Maximum accepted length.
        max: usize,
    },
    /// A name contained something other than ASCII letters and whitespace.
    NameInvalidCharacters,
    /// The email address was empty or only whitespace.
    EmptyEmail,
    /// The email address was not syntactically valid.
    InvalidEmail,
    /// The age fell outside the accepted range.
    AgeOutOfRange {
        /// Minimum accepted age.
        min: u8,
        /// Maximum accepted age.
        max: u8,
    },
    /// The phone number was not in international format.
    InvalidPhoneNumber,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::NameTooShort { min } => write!(f, "name must be at least {min} characters"),
            Self::NameTooLong { max } => write!(f, "name must be at most {max} characters"),
            Self::NameInvalidCharacters => {
                write!(f, "name can only contain letters and spaces")
            }
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::InvalidEmail => write!(f, "email must be a valid email address"),
            Self::AgeOutOfRange { min, max } => {
                write!(f, "age must be between {min} and {max}")
            }
            Self::InvalidPhoneNumber => {
                write!(f, "phone number must be a valid international format")
            }
        }
    }
}

impl std::error::Error for UserValidationError {}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|error| panic!("user field regex failed to compile: {error}"))
}

static NAME_RE: OnceLock<Regex> = OnceLock::new();
static EMAIL_LOCAL_RE: OnceLock<Regex> = OnceLock::new();
static EMAIL_LABEL_RE: OnceLock<Regex> = OnceLock::new();
static PHONE_RE: OnceLock<Regex> = OnceLock::new();

/// Longest accepted local part of an email address, in characters.
const EMAIL_LOCAL_MAX: usize = 64;
/// Longest accepted email domain, in characters.
const EMAIL_DOMAIN_MAX: usize = 255;

fn name_regex() -> &'static Regex {
    // Length is enforced separately; whitespace is the ASCII set only.
    NAME_RE.get_or_init(|| compile(r"^[a-zA-Z \t\n\x0B\x0C\r]+$"))
}

fn email_local_regex() -> &'static Regex {
    EMAIL_LOCAL_RE.get_or_init(|| {
        compile(
            r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~\x{80}-\x{FFFF}-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~\x{80}-\x{FFFF}-]+)*$",
        )
    })
}

fn email_label_regex() -> &'static Regex {
    // Labels hold at most 63 characters and never start or end with `-`.
    EMAIL_LABEL_RE.get_or_init(|| {
        compile(r"^[\p{L}\p{N}](?:[\p{L}\p{N}-]{0,61}[\p{L}\p{N}])?$")
    })
}

fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.rsplit_once('@') else {
        return false;
    };
    if local.chars().count() > EMAIL_LOCAL_MAX || !email_local_regex().is_match(local) {
        return false;
    }
    !domain.is_empty()
        && domain.chars().count() <= EMAIL_DOMAIN_MAX
        && domain.split('.').all(|label| email_label_regex().is_match(label))
}

fn phone_regex() -> &'static Regex {
    PHONE_RE.get_or_init(|| compile(r"^\+?[1-9][0-9]{1,14}$"))
}

/// Registry-assigned user identifier.
///
/// Identifiers start at 1 and are never reused within a process lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(u64);

impl UserId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Access the raw identifier.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for UserId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Minimum allowed length for first and last names.
pub const NAME_MIN: usize = 2;
/// Maximum allowed length for first and last names.
pub const NAME_MAX: usize = 50;

/// First or last name of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PersonName(String);

impl PersonName {
    /// Validate and construct a [`PersonName`].
    ///
    /// # Errors
    /// Returns [`UserValidationError`] when the name is blank, outside
    /// [`NAME_MIN`]..=[`NAME_MAX`] characters, or contains anything other
    /// than letters and whitespace.
    pub fn new(name: impl Into<String>) -> Result<Self, UserValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(UserValidationError::EmptyName);
        }

        let length = name.chars().count();
        if length < NAME_MIN {
            return Err(UserValidationError::NameTooShort { min: NAME_MIN });
        }
        if length > NAME_MAX {
            return Err(UserValidationError::NameTooLong { max: NAME_MAX });
        }

        if !name_regex().is_match(&name) {
            return Err(UserValidationError::NameInvalidCharacters);
        }

        Ok(Self(name))
    }
}

impl AsRef<str> for PersonName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<PersonName> for String {
    fn from(value: PersonName) -> Self {
        value.0
    }
}

impl TryFrom<String> for PersonName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Email address used as the uniqueness key of a user.
///
/// Comparison is case-sensitive and exact; no normalisation is applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`].
    ///
    /// # Errors
    /// Returns [`UserValidationError::EmptyEmail`] for blank input and
    /// [`UserValidationError::InvalidEmail`] when the syntax is invalid.
    pub fn new(email: impl Into<String>) -> Result<Self, UserValidationError> {
        let email = email.into();
        if email.trim().is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if !is_valid_email(&email) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(email))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Minimum accepted age.
pub const AGE_MIN: u8 = 0;
/// Maximum accepted age.
pub const AGE_MAX: u8 = 150;

/// Age in whole years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Age(u8);

impl Age {
    /// Validate and construct an [`Age`].
    ///
    /// # Errors
    /// Returns [`UserValidationError::AgeOutOfRange`] outside
    /// [`AGE_MIN`]..=[`AGE_MAX`].
    pub fn new(years: i64) -> Result<Self, UserValidationError> {
        let out_of_range = UserValidationError::AgeOutOfRange {
            min: AGE_MIN,
            max: AGE_MAX,
        };
        let years = u8::try_from(years).map_err(|_| out_of_range.clone())?;
        if !(AGE_MIN..=AGE_MAX).contains(&years) {
            return Err(out_of_range);
        }
        Ok(Self(years))
    }

    /// Age in years.
    #[must_use]
    pub const fn years(self) -> u8 {
        self.0
    }
}

impl From<Age> for u8 {
    fn from(value: Age) -> Self {
        value.0
    }
}

impl TryFrom<i64> for Age {
    type Error = UserValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Phone number in international format, e.g. `+15551234567`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Validate and construct a [`PhoneNumber`].
    ///
    /// # Errors
    /// Returns [`UserValidationError::InvalidPhoneNumber`] unless the input
    /// is an optional `+` followed by 2 to 15 digits with no leading zero.
    pub fn new(number: impl Into<String>) -> Result<Self, UserValidationError> {
        let number = number.into();
        if !phone_regex().is_match(&number) {
            return Err(UserValidationError::InvalidPhoneNumber);
        }
        Ok(Self(number))
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<PhoneNumber> for String {
    fn from(value: PhoneNumber) -> Self {
        value.0
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// User fields without a registry identifier.
///
/// Drafts are what callers hand to the registry on create and update; the
/// registry pairs them with a [`UserId`] to form a [`User`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDraft {
    first_name: PersonName,
    last_name: PersonName,
    email: EmailAddress,
    age: Age,
    phone_number: Option<PhoneNumber>,
}

impl UserDraft {
    /// Build a draft from validated components.
    #[must_use]
    pub const fn new(
        first_name: PersonName,
        last_name: PersonName,
        email: EmailAddress,
        age: Age,
        phone_number: Option<PhoneNumber>,
    ) -> Self {
        Self {
            first_name,
            last_name,
            email,
            age,
            phone_number,
        }
    }

    /// Fallible constructor validating raw field values.
    ///
    /// # Errors
    /// Returns the first [`UserValidationError`] raised by a field
    /// constructor, checked in declaration order.
    pub fn try_from_parts(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        age: i64,
        phone_number: Option<String>,
    ) -> Result<Self, UserValidationError> {
        Ok(Self::new(
            PersonName::new(first_name)?,
            PersonName::new(last_name)?,
            EmailAddress::new(email)?,
            Age::new(age)?,
            phone_number.map(PhoneNumber::new).transpose()?,
        ))
    }

    /// First name.
    #[must_use]
    pub const fn first_name(&self) -> &PersonName {
        &self.first_name
    }

    /// Last name.
    #[must_use]
    pub const fn last_name(&self) -> &PersonName {
        &self.last_name
    }

    /// Email address, unique across the registry.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Age in years.
    #[must_use]
    pub const fn age(&self) -> Age {
        self.age
    }

    /// Optional phone number.
    #[must_use]
    pub const fn phone_number(&self) -> Option<&PhoneNumber> {
        self.phone_number.as_ref()
    }
}

/// Stored user record.
///
/// ## Invariants
/// - `id` was assigned by the registry and never changes.
/// - All other fields satisfy the validation rules of their types.
///
/// Serialised in camelCase: `{"id":1,"firstName":"John","lastName":"Doe",
/// "email":"john@example.com","age":30,"phoneNumber":"+15551234567"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UserDto", into = "UserDto")]
pub struct User {
    id: UserId,
    draft: UserDraft,
}

impl User {
    /// Pair a registry identifier with validated fields.
    #[must_use]
    pub const fn new(id: UserId, draft: UserDraft) -> Self {
        Self { id, draft }
    }

    /// Registry-assigned identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Field values without the identifier.
    #[must_use]
    pub const fn draft(&self) -> &UserDraft {
        &self.draft
    }

    /// Email address, unique across the registry.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        self.draft.email()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserDto {
    id: u64,
    first_name: String,
    last_name: String,
    email: String,
    age: i64,
    #[serde(default)]
    phone_number: Option<String>,
}

impl From<User> for UserDto {
    fn from(value: User) -> Self {
        let User { id, draft } = value;
        let UserDraft {
            first_name,
            last_name,
            email,
            age,
            phone_number,
        } = draft;
        Self {
            id: id.get(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            age: i64::from(age.years()),
            phone_number: phone_number.map(String::from),
        }
    }
}

impl TryFrom<UserDto> for User {
    type Error = UserValidationError;

    fn try_from(value: UserDto) -> Result<Self, Self::Error> {
        let UserDto {
            id,
            first_name,
            last_name,
            email,
            age,
            phone_number,
        } = value;
        let draft = UserDraft::try_from_parts(first_name, last_name, email, age, phone_number)?;
        Ok(Self::new(UserId::new(id), draft))
    }
}

#[cfg(test)]
mod tests;
