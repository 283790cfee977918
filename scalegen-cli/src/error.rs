use std::{fmt::Debug, path::Path};

pub trait ResultExt<T, E> {
    /// Converts the error into a [`String`]-based error, prefixed by `context`.
    fn handle_error<F>(self, context: &str) -> Result<T, F>
    where
        E: Debug,
        F: From<String>;

    /// Like [`ResultExt::handle_error`] but names the file the error refers to.
    fn handle_file_error<F>(self, action: &str, file_name: &Path) -> Result<T, F>
    where
        E: Debug,
        F: From<String>;
}

impl<T, E> ResultExt<T, E> for Result<T, E> {
    fn handle_error<F>(self, context: &str) -> Result<T, F>
    where
        E: Debug,
        F: From<String>,
    {
        self.map_err(|err| F::from(format!("{context}\n{err:#?}")))
    }

    fn handle_file_error<F>(self, action: &str, file_name: &Path) -> Result<T, F>
    where
        E: Debug,
        F: From<String>,
    {
        self.handle_error(&format!("Could not {action} {}", file_name.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_is_prepended() {
        let result: Result<(), String> = Err::<(), _>("details").handle_error("Could not do it");
        assert_eq!(result, Err("Could not do it\n\"details\"".to_owned()));
    }

    #[test]
    fn file_name_is_mentioned() {
        let result: Result<(), String> =
            Err::<(), _>(42).handle_file_error("read", Path::new("scales.yml"));
        assert_eq!(result, Err("Could not read scales.yml\n42".to_owned()));
    }
}
