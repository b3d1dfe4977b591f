mod exponents;
mod properties;
