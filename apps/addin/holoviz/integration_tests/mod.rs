mod addin;
