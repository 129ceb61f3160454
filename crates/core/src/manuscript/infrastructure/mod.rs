pub mod plain_text_parser;
