pub mod hangman;
pub mod matchpairs;
pub mod scramble;
