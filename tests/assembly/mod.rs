mod tests_declarations;
mod tests_members;
mod tests_plugins;
mod tests_project;
