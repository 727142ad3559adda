mod tests_edits;
mod tests_factory;
mod tests_kind;
mod tests_tree;
