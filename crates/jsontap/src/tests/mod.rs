mod generate;
mod merge_patch;
