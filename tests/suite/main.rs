mod chain_tests;
mod normalize_tests;
mod parser_tests;
mod tensor_tests;
