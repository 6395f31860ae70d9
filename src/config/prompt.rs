use crate::utils::error::{Result, SizingError};
use crate::utils::validation::validate_usage_hours;
use dialoguer::{theme::ColorfulTheme, Confirm, Input};
use std::io::BufRead;

/// 互動式輸入；核心計算不依賴這裡
pub struct Prompter {
    theme: ColorfulTheme,
}

impl Default for Prompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }

    pub fn ask_num_users(&self) -> Result<i64> {
        Input::<i64>::with_theme(&self.theme)
            .with_prompt("Enter the number of users")
            .validate_with(|users: &i64| {
                check_num_users(*users).map_err(|e| e.user_friendly_message())
            })
            .interact_text()
            .map_err(terminal_error)
    }

    /// 確認後才會詢問時數；否則回傳 `None` 使用預設值
    pub fn ask_usage_hours(&self, default_hours: f64) -> Result<Option<f64>> {
        let wants_custom = Confirm::with_theme(&self.theme)
            .with_prompt(usage_time_question(default_hours))
            .default(false)
            .interact()
            .map_err(terminal_error)?;
        if !wants_custom {
            return Ok(None);
        }

        let hours = Input::<f64>::with_theme(&self.theme)
            .with_prompt("Enter required time usage time (hour)")
            .validate_with(|hours: &f64| {
                validate_usage_hours("usage_hours", *hours).map_err(|e| e.user_friendly_message())
            })
            .interact_text()
            .map_err(terminal_error)?;
        Ok(Some(hours))
    }
}

pub fn usage_time_question(default_hours: f64) -> String {
    format!(
        "Do you want to specify usage time. Default is {} hours",
        default_hours
    )
}

pub fn check_num_users(users: i64) -> Result<()> {
    if users < 0 {
        return Err(SizingError::invalid_input(
            "num_users",
            users,
            "number of users cannot be negative",
        ));
    }
    Ok(())
}

/// stdin 不是終端機時使用：第一行為使用者數，第二行（可省略或留空）為時數
pub fn read_piped_answers<R: BufRead>(input: R) -> Result<(i64, Option<f64>)> {
    let mut lines = input.lines();
    let users = match lines.next() {
        Some(line) => parse_users(&line?)?,
        None => {
            return Err(SizingError::invalid_input(
                "num_users",
                "<eof>",
                "input ended before an answer was given",
            ))
        }
    };
    let hours = match lines.next() {
        Some(line) => {
            let line = line?;
            if line.trim().is_empty() {
                None
            } else {
                Some(parse_hours(&line)?)
            }
        }
        None => None,
    };
    Ok((users, hours))
}

pub fn parse_users(answer: &str) -> Result<i64> {
    let answer = answer.trim();
    let users: i64 = answer
        .parse()
        .map_err(|_| SizingError::invalid_input("num_users", answer, "not a whole number"))?;
    check_num_users(users)?;
    Ok(users)
}

pub fn parse_hours(answer: &str) -> Result<f64> {
    let answer = answer.trim();
    let hours: f64 = answer
        .parse()
        .map_err(|_| SizingError::invalid_input("usage_hours", answer, "not a number"))?;
    validate_usage_hours("usage_hours", hours)?;
    Ok(hours)
}

fn terminal_error(e: dialoguer::Error) -> SizingError {
    SizingError::Io(std::io::Error::other(e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_users() {
        assert_eq!(parse_users("150").unwrap(), 150);
        assert_eq!(parse_users(" 0\n").unwrap(), 0);
    }

    #[test]
    fn test_parse_users_rejects_bad_input() {
        assert!(parse_users("lots").is_err());
        assert!(parse_users("").is_err());
        assert!(matches!(
            parse_users("-4"),
            Err(SizingError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_check_num_users() {
        assert!(check_num_users(0).is_ok());
        assert!(check_num_users(1_000).is_ok());
        assert!(check_num_users(-1).is_err());
    }

    #[test]
    fn test_usage_time_question() {
        assert_eq!(
            usage_time_question(24.0),
            "Do you want to specify usage time. Default is 24 hours"
        );
        assert!(usage_time_question(10.5).contains("10.5 hours"));
    }

    #[test]
    fn test_parse_hours() {
        assert_eq!(parse_hours("8.5").unwrap(), 8.5);
        assert_eq!(parse_hours("24").unwrap(), 24.0);
    }

    #[test]
    fn test_parse_hours_out_of_range() {
        assert!(parse_hours("0").is_err());
        assert!(parse_hours("36").is_err());
        assert!(parse_hours("all day").is_err());
    }

    #[test]
    fn test_read_piped_answers() {
        let (users, hours) = read_piped_answers(Cursor::new("250\n8\n")).unwrap();
        assert_eq!(users, 250);
        assert_eq!(hours, Some(8.0));

        let (users, hours) = read_piped_answers(Cursor::new("40\n")).unwrap();
        assert_eq!(users, 40);
        assert_eq!(hours, None);

        let (_, hours) = read_piped_answers(Cursor::new("40\n\n")).unwrap();
        assert_eq!(hours, None);
    }

    #[test]
    fn test_read_piped_answers_rejects_bad_input() {
        assert!(read_piped_answers(Cursor::new("")).is_err());
        assert!(read_piped_answers(Cursor::new("-3\n")).is_err());
        assert!(read_piped_answers(Cursor::new("10\n30\n")).is_err());
    }
}
